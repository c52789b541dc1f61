pub use glam::Vec2;

/// Couleur RGBA (composantes dans [0, 1])
pub type Color = glam::Vec4;

// ------------------------
// UpdateResult
// ------------------------
/// Compteurs renvoyés par une mise à jour du moteur (une frame).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateResult {
    /// Particules créées pendant cette frame (émission ambiante)
    pub spawned: usize,
    /// Particules retirées de la collection (opacité ou rayon sous le seuil)
    pub expired: usize,
    /// Particules encore vivantes après la mise à jour
    pub live: usize,
}

// ------------------------
// AnchorRect
// ------------------------
/// Rectangle d'ancrage en coordonnées logiques de la fenêtre.
///
/// Tient lieu de l'élément d'interface autour duquel les étincelles
/// apparaissent : son centre est l'origine d'émission, et un clic à
/// l'intérieur bascule l'animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl AnchorRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Centre du rectangle, utilisé comme origine d'émission.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }
}
