use rand::Rng;

use crate::physic_engine::config::PhysicConfig;
use crate::physic_engine::types::Color;

/// Palette à deux entrées pour les étincelles.
///
/// La couleur d'une particule est tirée au sort à la création, avec un
/// poids donné pour la couleur primaire (le reste va à la secondaire).
/// Le poids dépend du mode : émission ambiante ou burst initial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparklePalette {
    pub primary: Color,
    pub secondary: Color,
}

impl SparklePalette {
    pub fn from_config(config: &PhysicConfig) -> Self {
        Self {
            primary: Color::from_array(config.palette_primary),
            secondary: Color::from_array(config.palette_secondary),
        }
    }

    /// Tirage pondéré : primaire avec probabilité `primary_weight`.
    pub fn pick(&self, rng: &mut impl Rng, primary_weight: f32) -> Color {
        if rng.random::<f32>() < primary_weight {
            self.primary
        } else {
            self.secondary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_pick_returns_only_palette_colors() {
        let palette = SparklePalette::from_config(&PhysicConfig::default());
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let color = palette.pick(&mut rng, 0.9);
            assert!(color == palette.primary || color == palette.secondary);
        }
    }

    #[test]
    fn test_pick_extreme_weights() {
        let palette = SparklePalette::from_config(&PhysicConfig::default());
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        for _ in 0..50 {
            assert_eq!(palette.pick(&mut rng, 1.0), palette.primary);
            assert_eq!(palette.pick(&mut rng, 0.0), palette.secondary);
        }
    }

    #[test]
    fn test_pick_weight_is_respected_statistically() {
        let palette = SparklePalette::from_config(&PhysicConfig::default());
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);

        let n = 10_000;
        let primaries = (0..n)
            .filter(|_| palette.pick(&mut rng, 0.7) == palette.primary)
            .count();

        // 0.7 ± marge large, le tirage est statistique
        assert!(
            (6_500..=7_500).contains(&primaries),
            "Primary picks out of band: {}",
            primaries
        );
    }
}
