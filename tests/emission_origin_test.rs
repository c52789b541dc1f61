use std::cell::RefCell;
use std::rc::Rc;

use sparkles_sim::physic_engine::{AnchorRect, Vec2};
use sparkles_sim::renderer_engine::RendererConfig;
use sparkles_sim::Simulator;

mod helpers;
use helpers::{ScriptedWindowEngine, TestPhysic, TestRenderer};

// ==================================
// 1. Géométrie de l'ancre
// ==================================

#[test]
fn test_anchor_rect_center_is_emission_origin() {
    // Le rect {left:100, top:50, width:40, height:40} donne (120, 70)
    let rect = AnchorRect::new(100.0, 50.0, 40.0, 40.0);
    assert_eq!(rect.center(), Vec2::new(120.0, 70.0));
}

// ==================================
// 2. handle_resize → origine
// ==================================

#[test]
fn test_resize_positions_origin_at_anchor_center() {
    // Fenêtre logique 240 x 140 avec une ancre de 40 centrée aux
    // fractions 0.5 / 0.5 : rect {100, 50, 40, 40}, centre (120, 70)
    let mut renderer_config = RendererConfig::default();
    renderer_config.anchor_rel_x = 0.5;
    renderer_config.anchor_rel_y = 0.5;
    renderer_config.anchor_size = 40.0;

    let log = Rc::new(RefCell::new(vec![]));
    let window = ScriptedWindowEngine::with_size(240, 140);

    let sim = Simulator::new(
        TestRenderer::new(log.clone()),
        TestPhysic::new(log.clone()),
        window,
        renderer_config,
    );

    assert_eq!(sim.anchor(), AnchorRect::new(100.0, 50.0, 40.0, 40.0));
    assert_eq!(sim.physic_engine().origin, Vec2::new(120.0, 70.0));
}

#[test]
fn test_origin_follows_window_size() {
    let mut renderer_config = RendererConfig::default();
    renderer_config.anchor_rel_x = 0.5;
    renderer_config.anchor_rel_y = 0.5;
    renderer_config.anchor_size = 40.0;

    for (w, h) in [(800, 600), (1024, 800), (400, 300)] {
        let log = Rc::new(RefCell::new(vec![]));
        let window = ScriptedWindowEngine::with_size(w, h);

        let sim = Simulator::new(
            TestRenderer::new(log.clone()),
            TestPhysic::new(log.clone()),
            window,
            renderer_config.clone(),
        );

        assert_eq!(
            sim.physic_engine().origin,
            Vec2::new(w as f32 / 2.0, h as f32 / 2.0)
        );
    }
}
