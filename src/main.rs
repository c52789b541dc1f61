use anyhow::Result;
use log::info;

use sparkles_sim::physic_engine::config::PhysicConfig;
use sparkles_sim::physic_engine::PhysicEngineSparkles;
use sparkles_sim::renderer_engine::renderer::Renderer;
use sparkles_sim::renderer_engine::RendererConfig;
use sparkles_sim::utils::show_rust_core_dependencies;
use sparkles_sim::window_engine::{GlfwWindowEngine, WindowEngine};
use sparkles_sim::Simulator;

/// Main entry point for the Heart Sparkles application.
fn main() -> Result<()> {
    env_logger::init();

    info!("✨ Starting Heart Sparkles...");

    show_rust_core_dependencies();

    let physic_config = PhysicConfig::from_file("assets/config/physic.toml").unwrap_or_default();
    info!("Physic config loaded:\n{:#?}", physic_config);

    let renderer_config =
        RendererConfig::from_file("assets/config/renderer.toml").unwrap_or_default();
    info!("Renderer config loaded:\n{:#?}", renderer_config);

    let window_width = 1024;
    let window_height = 800;

    // 1. Init Window & Context
    let window_engine = GlfwWindowEngine::init(window_width, window_height, "Heart Sparkles")?;

    // 2. Init Renderer (now that GL context is ready)
    let (fb_width, fb_height) = window_engine.get_framebuffer_size();
    let renderer_engine = Renderer::new(fb_width, fb_height, &renderer_config)?;

    let physic_engine = PhysicEngineSparkles::new(&physic_config);

    // 3. Init Simulator
    let mut simulator = Simulator::new(
        renderer_engine,
        physic_engine,
        window_engine,
        renderer_config,
    );
    simulator.run()?;
    simulator.close();

    Ok(())
}
