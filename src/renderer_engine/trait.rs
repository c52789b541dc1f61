use crate::physic_engine::PhysicEngineIterator;
use crate::renderer_engine::config::RendererConfig;

pub trait RendererEngine {
    /// Dessine une frame : voile de traînée puis toutes les particules
    /// vivantes. Retourne le nombre de particules dessinées.
    fn render_frame(&mut self, physic: &dyn PhysicEngineIterator) -> usize;

    /// Adapte la surface de dessin à une nouvelle taille en pixels
    /// physiques et au device pixel ratio courant.
    fn set_surface_size(&mut self, width_px: i32, height_px: i32, scale: (f32, f32));

    fn reload_config(&mut self, config: &RendererConfig);

    fn close(&mut self);
}
