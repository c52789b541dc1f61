use sparkles_sim::physic_engine::config::PhysicConfig;
use sparkles_sim::physic_engine::{
    Particle, PhysicEngine, PhysicEngineFull, PhysicEngineIterator, UpdateResult, Vec2,
};
use sparkles_sim::renderer_engine::{RendererConfig, RendererEngine};
use sparkles_sim::window_engine::{WindowEngine, WindowSignal};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

pub type CallLog = Rc<RefCell<Vec<String>>>;

// ==================================
// Window engine scripté (headless)
// ==================================

/// Double de WindowEngine sans fenêtre : sert les signaux scriptés
/// frame par frame, pour piloter le Simulator en headless.
pub struct ScriptedWindowEngine {
    pub queued_signals: VecDeque<Vec<WindowSignal>>,
    pub should_close: bool,
    pub size: (i32, i32),
    pub framebuffer_size: (i32, i32),
    pub content_scale: (f32, f32),
}

#[allow(dead_code)]
impl ScriptedWindowEngine {
    pub fn with_size(width: i32, height: i32) -> Self {
        Self {
            queued_signals: VecDeque::new(),
            should_close: false,
            size: (width, height),
            framebuffer_size: (width, height),
            content_scale: (1.0, 1.0),
        }
    }

    /// Enfile les signaux servis au prochain drain (une frame)
    pub fn push_signals(&mut self, signals: Vec<WindowSignal>) {
        self.queued_signals.push_back(signals);
    }
}

impl WindowEngine for ScriptedWindowEngine {
    fn init(width: i32, height: i32, _title: &str) -> anyhow::Result<Self> {
        Ok(Self::with_size(width, height))
    }

    fn drain_signals(&mut self) -> Vec<WindowSignal> {
        self.queued_signals.pop_front().unwrap_or_default()
    }

    fn swap_buffers(&mut self) {}

    fn should_close(&self) -> bool {
        self.should_close
    }

    fn set_should_close(&mut self, value: bool) {
        self.should_close = value;
    }

    fn get_size(&self) -> (i32, i32) {
        self.size
    }

    fn get_framebuffer_size(&self) -> (i32, i32) {
        self.framebuffer_size
    }

    fn get_content_scale(&self) -> (f32, f32) {
        self.content_scale
    }
}

// ==================================
// Renderer doubles
// ==================================

#[allow(dead_code)]
pub struct DummyRenderer;

#[allow(dead_code)]
impl RendererEngine for DummyRenderer {
    fn render_frame(&mut self, _physic: &dyn PhysicEngineIterator) -> usize {
        0
    }
    fn set_surface_size(&mut self, _width_px: i32, _height_px: i32, _scale: (f32, f32)) {}
    fn reload_config(&mut self, _config: &RendererConfig) {}
    fn close(&mut self) {}
}

pub struct TestRenderer {
    pub log: CallLog,
}

#[allow(dead_code)]
impl TestRenderer {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl RendererEngine for TestRenderer {
    fn render_frame(&mut self, physic: &dyn PhysicEngineIterator) -> usize {
        self.log.borrow_mut().push("renderer.render_frame".into());
        physic.iter_live_particles().count()
    }

    fn set_surface_size(&mut self, _width_px: i32, _height_px: i32, _scale: (f32, f32)) {
        self.log
            .borrow_mut()
            .push("renderer.set_surface_size".into());
    }

    fn reload_config(&mut self, _config: &RendererConfig) {
        self.log.borrow_mut().push("renderer.reload_config".into());
    }

    fn close(&mut self) {
        self.log.borrow_mut().push("renderer.close".into());
    }
}

// ==================================
// Physic doubles
// ==================================

pub struct TestPhysic {
    pub log: CallLog,
    pub active: bool,
    pub origin: Vec2,
    config: PhysicConfig,
}

#[allow(dead_code)]
impl TestPhysic {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            active: false,
            origin: Vec2::ZERO,
            config: PhysicConfig::default(),
        }
    }
}

impl PhysicEngine for TestPhysic {
    fn update(&mut self) -> UpdateResult {
        self.log.borrow_mut().push("physic.update".into());
        UpdateResult::default()
    }

    fn set_active(&mut self, active: bool) {
        self.log
            .borrow_mut()
            .push(format!("physic.set_active({})", active));
        self.active = active;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_emission_origin(&mut self, origin: Vec2) {
        self.log
            .borrow_mut()
            .push("physic.set_emission_origin".into());
        self.origin = origin;
    }

    fn emission_origin(&self) -> Vec2 {
        self.origin
    }

    fn live_count(&self) -> usize {
        0
    }

    fn reload_config(&mut self, _config: &PhysicConfig) -> bool {
        self.log.borrow_mut().push("physic.reload_config".into());
        false
    }

    fn get_config(&self) -> &PhysicConfig {
        &self.config
    }

    fn close(&mut self) {
        self.log.borrow_mut().push("physic.close".into());
    }

    fn as_physic_engine(&self) -> &dyn PhysicEngine {
        self
    }
}

impl PhysicEngineIterator for TestPhysic {
    fn iter_live_particles<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Particle> + 'a> {
        // Itérateur vide, compatible avec la signature
        Box::new(std::iter::empty())
    }
}

impl PhysicEngineFull for TestPhysic {}
