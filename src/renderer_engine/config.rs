use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RendererConfig {
    /// Couleur de fond, aussi celle du voile de traînée
    pub background_color: [f32; 3],
    /// Opacité du voile peint à chaque frame (effet de traînée, pas
    /// d'effacement dur)
    pub trail_alpha: f32,
    /// Taille de point (pixels logiques) par unité de rayon
    pub point_scale: f32,
    pub max_sparkles_on_gpu: usize,

    // Position de l'ancre, en fractions de la taille logique
    pub anchor_rel_x: f32,
    pub anchor_rel_y: f32,
    pub anchor_size: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            background_color: [0.05, 0.02, 0.04],
            trail_alpha: 0.05,
            point_scale: 6.0,
            max_sparkles_on_gpu: 4096,
            anchor_rel_x: 0.5,
            anchor_rel_y: 0.45,
            anchor_size: 48.0,
        }
    }
}

impl RendererConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
