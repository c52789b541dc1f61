use std::cell::RefCell;
use std::rc::Rc;

use sparkles_sim::renderer_engine::RendererConfig;
use sparkles_sim::window_engine::{WindowEngine, WindowSignal};
use sparkles_sim::Simulator;

mod helpers;
use helpers::{ScriptedWindowEngine, TestPhysic, TestRenderer};

fn build_simulator(
    log: &Rc<RefCell<Vec<String>>>,
    window: ScriptedWindowEngine,
) -> Simulator<TestRenderer, TestPhysic, ScriptedWindowEngine> {
    Simulator::new(
        TestRenderer::new(log.clone()),
        TestPhysic::new(log.clone()),
        window,
        RendererConfig::default(),
    )
}

// Ce test vérifie l'ordre global des appels entre les moteurs
#[test]
fn test_call_order_in_step_and_close() {
    // Journal partagé entre tous les mocks
    let log = Rc::new(RefCell::new(vec![]));
    let window = ScriptedWindowEngine::with_size(800, 600);

    let mut sim = build_simulator(&log, window);
    assert!(sim.step());
    sim.close();

    let calls = log.borrow();
    assert_eq!(
        *calls,
        vec![
            // --- Dimensionnement initial (new) ---
            "renderer.set_surface_size",
            "physic.set_emission_origin",
            // --- Une frame ---
            "physic.update",
            "renderer.render_frame",
            // --- Fermeture ---
            "renderer.close",
            "physic.close",
        ]
    );
}

#[test]
fn test_toggle_signal_flips_activation() {
    let log = Rc::new(RefCell::new(vec![]));
    let mut window = ScriptedWindowEngine::with_size(800, 600);
    window.push_signals(vec![WindowSignal::ToggleRequested]);
    window.push_signals(vec![]);
    window.push_signals(vec![WindowSignal::ToggleRequested]);

    let mut sim = build_simulator(&log, window);

    sim.step();
    assert!(sim.physic_engine().active, "Toggle should activate");

    sim.step();
    assert!(sim.physic_engine().active, "No signal, state unchanged");

    sim.step();
    assert!(!sim.physic_engine().active, "Second toggle deactivates");
}

#[test]
fn test_pointer_press_toggles_only_inside_anchor() {
    // Fenêtre 240 x 140, ancre par défaut (0.5 / 0.45, taille 48)
    // → rect {96, 39, 48, 48}
    let log = Rc::new(RefCell::new(vec![]));
    let mut window = ScriptedWindowEngine::with_size(240, 140);
    window.push_signals(vec![WindowSignal::PointerPressed { x: 10.0, y: 10.0 }]);
    window.push_signals(vec![WindowSignal::PointerPressed { x: 120.0, y: 63.0 }]);

    let mut sim = build_simulator(&log, window);
    let anchor = sim.anchor();
    assert!(!anchor.contains(10.0, 10.0));
    assert!(anchor.contains(120.0, 63.0));

    sim.step();
    assert!(!sim.physic_engine().active, "Click outside anchor ignored");

    sim.step();
    assert!(sim.physic_engine().active, "Click inside anchor toggles");
}

#[test]
fn test_resize_signal_recomputes_origin() {
    let log = Rc::new(RefCell::new(vec![]));
    let mut window = ScriptedWindowEngine::with_size(800, 600);
    window.push_signals(vec![WindowSignal::SurfaceResized {
        width_px: 400,
        height_px: 300,
    }]);

    let mut sim = build_simulator(&log, window);
    log.borrow_mut().clear();

    sim.step();

    let calls = log.borrow();
    assert!(calls.contains(&"renderer.set_surface_size".into()));
    assert!(calls.contains(&"physic.set_emission_origin".into()));
}

#[test]
fn test_close_requested_stops_on_next_step() {
    let log = Rc::new(RefCell::new(vec![]));
    let mut window = ScriptedWindowEngine::with_size(800, 600);
    window.push_signals(vec![WindowSignal::CloseRequested]);

    let mut sim = build_simulator(&log, window);

    // La frame en cours se termine, la boucle s'arrête à la frontière
    assert!(sim.step());
    assert!(!sim.step());
}

#[test]
fn test_explicit_stop_halts_loop() {
    let log = Rc::new(RefCell::new(vec![]));
    let window = ScriptedWindowEngine::with_size(800, 600);

    let mut sim = build_simulator(&log, window);
    assert!(sim.step());

    sim.stop();
    assert!(!sim.step());
}

#[test]
fn test_run_terminates_once_stopped() {
    let log = Rc::new(RefCell::new(vec![]));
    let mut window = ScriptedWindowEngine::with_size(800, 600);
    window.push_signals(vec![]);
    window.push_signals(vec![WindowSignal::CloseRequested]);

    let mut sim = build_simulator(&log, window);
    sim.run().unwrap();

    assert_eq!(sim.frames(), 2);
}
