use crate::physic_engine::{config::PhysicConfig, AnchorRect, PhysicEngineFull};
use crate::renderer_engine::{RendererConfig, RendererEngine};
use crate::window_engine::{WindowEngine, WindowSignal};
use crate::{log_metrics_and_fps, profiler::Profiler};
use log::{debug, info};
use std::time::Instant;

/// Pilote de la boucle de rendu.
///
/// Possède les trois moteurs et l'état de la boucle : une frame =
/// drainage des signaux fenêtre, mise à jour du moteur d'étincelles,
/// rendu, puis replanification par l'échange de buffers (vsync). La
/// boucle n'a pas de fin naturelle mais reste arrêtable explicitement
/// via `stop()`.
pub struct Simulator<R, P, W>
where
    R: RendererEngine,
    P: PhysicEngineFull,
    W: WindowEngine,
{
    renderer_engine: R,
    physic_engine: P,
    window_engine: W,

    renderer_config: RendererConfig,
    /// Rectangle d'ancrage courant, recalculé à chaque resize
    anchor: AnchorRect,

    frames: u64,
    last_time: Instant,

    // Loop state
    profiler: Profiler,
    fps_avg: f32,
    last_log: Instant,
    first_frame: bool,
}

impl<R, P, W> Simulator<R, P, W>
where
    R: RendererEngine,
    P: PhysicEngineFull,
    W: WindowEngine,
{
    pub fn new(
        renderer_engine: R,
        physic_engine: P,
        window_engine: W,
        renderer_config: RendererConfig,
    ) -> Self {
        let mut simulator = Self {
            renderer_engine,
            physic_engine,
            window_engine,
            renderer_config,
            anchor: AnchorRect::new(0.0, 0.0, 0.0, 0.0),
            frames: 0,
            last_time: Instant::now(),
            profiler: Profiler::new(),
            fps_avg: 0.0,
            last_log: Instant::now(),
            first_frame: true,
        };

        // Dimensionnement initial : surface, ancre et origine d'émission
        simulator.handle_resize();
        simulator
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        while self.step() {}

        Ok(())
    }

    pub fn step(&mut self) -> bool {
        if self.window_engine.should_close() {
            return false;
        }

        let mut resize_needed = false;
        let mut reload_config = false;

        for signal in self.window_engine.drain_signals() {
            match signal {
                WindowSignal::SurfaceResized { .. } | WindowSignal::ScaleChanged { .. } => {
                    resize_needed = true;
                }
                WindowSignal::ToggleRequested => {
                    self.toggle_sparkles();
                }
                WindowSignal::PointerPressed { x, y } => {
                    // seul un clic dans l'ancre bascule l'animation
                    if self.anchor.contains(x, y) {
                        self.toggle_sparkles();
                    }
                }
                WindowSignal::ReloadConfigRequested => {
                    reload_config = true;
                }
                WindowSignal::CloseRequested => {
                    self.window_engine.set_should_close(true);
                }
            }
        }
        if resize_needed {
            self.handle_resize();
        }
        if reload_config {
            self.reload_config();
        }

        // 🔹 start global frame
        let _frame_guard = self.profiler.frame(); // RAII: mesure totale de la frame

        let now = Instant::now();
        let delta = now.duration_since(self.last_time).as_secs_f32();
        self.last_time = now;
        self.frames += 1;

        // 🔹 FPS instantané (le delta ne pilote pas la physique, qui
        // avance d'une frame implicite)
        let fps = if delta > 0.0 { 1.0 / delta } else { 0.0 };

        let update_result = self
            .profiler
            .profile_block("physic - update", || self.physic_engine.update());
        self.profiler
            .record_metric("sparkles spawned", update_result.spawned as f64);
        self.profiler
            .record_metric("sparkles live", update_result.live as f64);

        self.profiler.profile_block("render frame", || {
            self.profiler.record_metric(
                "sparkles drawn",
                self.renderer_engine.render_frame(&self.physic_engine) as f64,
            );
        });

        // moyenne pondérée EMA
        let alpha = 0.15;
        self.fps_avg = alpha * fps + (1.0 - alpha) * self.fps_avg;

        // affichage périodique
        if self.last_log.elapsed() >= std::time::Duration::from_secs(5) {
            log_metrics_and_fps!(&self.profiler);
            info!("FPS moyen (EMA): {:.2}", self.fps_avg);
            self.profiler.reset();
            self.last_log = Instant::now();
        }

        self.window_engine.swap_buffers();

        if self.first_frame {
            info!("✨ First frame rendered");
            self.first_frame = false;
        }

        true
    }

    /// Bascule l'état d'activation. Le burst initial part sur le front
    /// inactif → actif, dans le moteur.
    pub fn toggle_sparkles(&mut self) {
        let active = !self.physic_engine.is_active();
        self.physic_engine.set_active(active);
        if active {
            info!("✨ Sparkles ON ({} live)", self.physic_engine.live_count());
        } else {
            info!("💤 Sparkles draining");
        }
    }

    /// Recalcule la résolution de la surface par rapport au device pixel
    /// ratio, puis l'ancre et l'origine d'émission à partir de la taille
    /// logique courante. Appelé au démarrage et à chaque signal de
    /// resize ou de changement d'échelle.
    pub fn handle_resize(&mut self) {
        let (width_px, height_px) = self.window_engine.get_framebuffer_size();
        let scale = self.window_engine.get_content_scale();
        self.renderer_engine
            .set_surface_size(width_px, height_px, scale);

        let (logical_w, logical_h) = self.window_engine.get_size();
        self.anchor = compute_anchor(logical_w as f32, logical_h as f32, &self.renderer_config);
        self.physic_engine.set_emission_origin(self.anchor.center());
        debug!(
            "Anchor {:?}, emission origin {:?}",
            self.anchor,
            self.physic_engine.emission_origin()
        );
    }

    pub fn reload_config(&mut self) {
        let physic_config =
            PhysicConfig::from_file("assets/config/physic.toml").unwrap_or_default();
        info!("Physic config loaded:\n{:#?}", physic_config);
        self.physic_engine.reload_config(&physic_config);

        let renderer_config =
            RendererConfig::from_file("assets/config/renderer.toml").unwrap_or_default();
        self.renderer_engine.reload_config(&renderer_config);
        self.renderer_config = renderer_config;

        // l'ancre dépend de la configuration du renderer
        self.handle_resize();
    }

    /// Arrêt explicite : la boucle s'interrompt à la prochaine frontière
    /// de frame.
    pub fn stop(&mut self) {
        self.window_engine.set_should_close(true);
    }

    pub fn close(&mut self) {
        self.renderer_engine.close();
        self.physic_engine.close();
        // Window engine cleanup happens automatically when dropped
    }

    pub fn renderer_engine(&self) -> &R {
        &self.renderer_engine
    }

    pub fn physic_engine(&self) -> &P {
        &self.physic_engine
    }

    pub fn anchor(&self) -> AnchorRect {
        self.anchor
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// L'ancre est un carré placé en fractions de la taille logique de la
/// fenêtre, l'équivalent de l'élément d'interface d'origine.
fn compute_anchor(logical_w: f32, logical_h: f32, config: &RendererConfig) -> AnchorRect {
    let size = config.anchor_size;
    AnchorRect::new(
        logical_w * config.anchor_rel_x - size / 2.0,
        logical_h * config.anchor_rel_y - size / 2.0,
        size,
        size,
    )
}
