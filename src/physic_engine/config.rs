use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PhysicConfig {
    /// Nombre de particules créées d'un coup à l'activation
    pub burst_count: usize,
    /// Probabilité (par frame) de créer une particule en émission ambiante
    pub ambient_spawn_probability: f32,

    pub radius_min: f32,
    pub radius_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub velocity_scale: f32,

    pub gravity: f32,
    pub drag: f32,

    /// Perte d'opacité par frame en mode actif
    pub fade_ambient: f32,
    /// Perte d'opacité par frame en mode drainage (désactivé)
    pub fade_drain: f32,
    /// Facteur de rétrécissement du rayon par frame
    pub radius_shrink: f32,
    /// Rayon sous lequel une particule est retirée
    pub radius_cull: f32,

    /// Poids de la couleur primaire en émission ambiante
    pub ambient_primary_weight: f32,
    /// Poids de la couleur primaire pendant le burst initial
    pub burst_primary_weight: f32,
    pub palette_primary: [f32; 4],
    pub palette_secondary: [f32; 4],
}

impl Default for PhysicConfig {
    fn default() -> Self {
        Self {
            burst_count: 80,
            ambient_spawn_probability: 0.6,
            radius_min: 0.5,
            radius_max: 2.0,
            speed_min: 0.1,
            speed_max: 0.5,
            velocity_scale: 2.0,
            gravity: 0.003,
            drag: 0.99,
            fade_ambient: 0.005,
            fade_drain: 0.01,
            radius_shrink: 0.995,
            radius_cull: 0.1,
            ambient_primary_weight: 0.9,
            burst_primary_weight: 0.7,
            palette_primary: [1.0, 0.42, 0.62, 1.0],
            palette_secondary: [1.0, 0.84, 0.31, 1.0],
        }
    }
}

impl PhysicConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
