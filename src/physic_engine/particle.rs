use rand::Rng;

use crate::physic_engine::config::PhysicConfig;
use crate::physic_engine::palette::SparklePalette;
use crate::physic_engine::types::{Color, Vec2};

/// Une étincelle : un point qui s'éteint (opacité) et rétrécit (rayon).
///
/// Possédée exclusivement par la collection du moteur, aucune référence
/// croisée. `drag` et `gravity` sont figés à la création.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    pub radius: f32,
    pub opacity: f32,
    pub drag: f32,
    pub gravity: f32,
}

impl Particle {
    /// Crée une particule à `origin` avec taille/vitesse/angle aléatoires.
    ///
    /// Rayon dans [radius_min, radius_max], vitesse scalaire dans
    /// [speed_min, speed_max] multipliée par `velocity_scale`, direction
    /// uniforme sur le cercle. Ne peut pas échouer.
    pub fn spawn(
        rng: &mut impl Rng,
        origin: Vec2,
        palette: &SparklePalette,
        primary_weight: f32,
        config: &PhysicConfig,
    ) -> Self {
        let radius = rng.random_range(config.radius_min..=config.radius_max);
        let speed = rng.random_range(config.speed_min..=config.speed_max);
        let angle = rng.random_range(0.0..(2.0 * std::f32::consts::PI));

        Self {
            pos: origin,
            vel: Vec2::from_angle(angle) * (speed * config.velocity_scale),
            color: palette.pick(rng, primary_weight),
            radius,
            opacity: 1.0,
            drag: config.drag,
            gravity: config.gravity,
        }
    }

    /// Avance la particule d'une frame.
    ///
    /// Ordre fixe : amortissement, gravité (y vers le bas), déplacement,
    /// fondu d'opacité, rétrécissement du rayon.
    #[inline(always)]
    pub fn integrate(&mut self, fade_rate: f32, radius_shrink: f32) {
        self.vel *= self.drag;
        self.vel.y += self.gravity;
        self.pos += self.vel;
        self.opacity -= fade_rate;
        self.radius *= radius_shrink;
    }

    /// Une particule reste vivante tant que son opacité est positive et
    /// que son rayon dépasse le seuil de retrait.
    #[inline]
    pub fn is_live(&self, radius_cull: f32) -> bool {
        self.opacity > 0.0 && self.radius > radius_cull
    }

    /// Alpha utilisé au dessin : l'opacité peut passer transitoirement
    /// sous zéro, on la borne avant de peindre.
    #[inline]
    pub fn paint_alpha(&self) -> f32 {
        self.opacity.clamp(0.0, 1.0)
    }

    /// Une position non finie (NaN/inf) est ignorée au dessin, jamais
    /// propagée : une particule malformée ne doit pas arrêter la boucle.
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.pos.is_finite() && self.opacity > 0.0
    }
}
