use anyhow::Result;

/// Évènement fenêtre déjà traduit pour le pilote de boucle.
///
/// Le trait ne laisse pas fuir les types GLFW : le Simulator peut être
/// piloté en headless par un double de test qui scripte ces signaux.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowSignal {
    /// La surface de dessin a changé de taille (en pixels physiques)
    SurfaceResized { width_px: i32, height_px: i32 },
    /// Le device pixel ratio a changé (écran haute densité, déplacement
    /// de fenêtre entre moniteurs)
    ScaleChanged { x: f32, y: f32 },
    /// Clic souris, en coordonnées logiques de la fenêtre
    PointerPressed { x: f32, y: f32 },
    /// Demande de bascule de l'animation (touche dédiée)
    ToggleRequested,
    /// Demande de rechargement des configurations
    ReloadConfigRequested,
    CloseRequested,
}

pub trait WindowEngine {
    fn init(width: i32, height: i32, title: &str) -> Result<Self>
    where
        Self: Sized;

    /// Collecte et traduit les évènements en attente.
    fn drain_signals(&mut self) -> Vec<WindowSignal>;
    fn swap_buffers(&mut self);
    fn should_close(&self) -> bool;
    fn set_should_close(&mut self, value: bool);
    /// Taille logique de la fenêtre (points)
    fn get_size(&self) -> (i32, i32);
    /// Taille de la surface de dessin (pixels physiques)
    fn get_framebuffer_size(&self) -> (i32, i32);
    /// Device pixel ratio par axe
    fn get_content_scale(&self) -> (f32, f32);
}
