use log::debug;
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::physic_engine::{
    config::PhysicConfig, palette::SparklePalette, particle::Particle, types::UpdateResult,
    types::Vec2, PhysicEngine, PhysicEngineFull, PhysicEngineIterator,
};

/// Moteur d'étincelles : possède la collection des particules vivantes,
/// l'origine d'émission et l'état d'activation.
///
/// Générique sur la source aléatoire pour rendre les tests
/// déterministes (StdRng seedé) tout en gardant le ThreadRng en
/// production.
#[derive(Debug)]
pub struct PhysicEngineSparkles<R: Rng = ThreadRng> {
    particles: Vec<Particle>,
    active: bool,
    emission_origin: Vec2,
    palette: SparklePalette,
    rng: R,

    config: PhysicConfig,
}

impl PhysicEngineSparkles<ThreadRng> {
    pub fn new(config: &PhysicConfig) -> Self {
        Self::with_rng(config, rand::rng())
    }
}

impl<R: Rng> PhysicEngineSparkles<R> {
    pub fn with_rng(config: &PhysicConfig, rng: R) -> Self {
        Self {
            // burst + quelques frames d'émission ambiante sans réallocation
            particles: Vec::with_capacity(config.burst_count * 2),
            active: false,
            emission_origin: Vec2::ZERO,
            palette: SparklePalette::from_config(config),
            rng,
            config: config.clone(),
        }
    }

    fn spawn_at_origin(&mut self, primary_weight: f32) {
        self.particles.push(Particle::spawn(
            &mut self.rng,
            self.emission_origin,
            &self.palette,
            primary_weight,
            &self.config,
        ));
    }

    /// Burst unique déclenché sur le front d'activation.
    fn spawn_burst(&mut self) {
        self.particles.reserve(self.config.burst_count);
        for _ in 0..self.config.burst_count {
            self.spawn_at_origin(self.config.burst_primary_weight);
        }
        debug!(
            "✨ Burst: {} sparkles at ({}, {})",
            self.config.burst_count, self.emission_origin.x, self.emission_origin.y
        );
    }

    fn update(&mut self) -> UpdateResult {
        let mut spawned = 0;

        // Émission ambiante : un tirage de Bernoulli par frame, au plus
        // une particule. Le taux effectif est statistique.
        if self.active {
            let p = f64::from(self.config.ambient_spawn_probability).clamp(0.0, 1.0);
            if self.rng.random_bool(p) {
                self.spawn_at_origin(self.config.ambient_primary_weight);
                spawned = 1;
            }
        }

        // En mode drainage les particules restantes s'éteignent plus vite
        let fade_rate = if self.active {
            self.config.fade_ambient
        } else {
            self.config.fade_drain
        };
        let radius_shrink = self.config.radius_shrink;

        for p in &mut self.particles {
            p.integrate(fade_rate, radius_shrink);
        }

        // Retrait en itérant à rebours : le swap_remove ramène un élément
        // déjà visité, aucune particule vivante n'est sautée.
        let before = self.particles.len();
        let radius_cull = self.config.radius_cull;
        for i in (0..self.particles.len()).rev() {
            if !self.particles[i].is_live(radius_cull) {
                self.particles.swap_remove(i);
            }
        }

        UpdateResult {
            spawned,
            expired: before - self.particles.len(),
            live: self.particles.len(),
        }
    }
}

// ==================================
// Trait PhysicEngine
// ==================================
impl<R: Rng> PhysicEngineIterator for PhysicEngineSparkles<R> {
    fn iter_live_particles<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Particle> + 'a> {
        Box::new(self.particles.iter())
    }
}

impl<R: Rng> PhysicEngine for PhysicEngineSparkles<R> {
    fn update(&mut self) -> UpdateResult {
        self.update()
    }

    fn set_active(&mut self, active: bool) {
        // Front inactif → actif : burst immédiat, avant la frame
        // suivante. Pas de debounce : des bascules rapides peuvent
        // empiler plusieurs bursts (comportement d'origine).
        if active && !self.active {
            self.spawn_burst();
        }
        self.active = active;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn set_emission_origin(&mut self, origin: Vec2) {
        self.emission_origin = if origin.is_finite() {
            origin
        } else {
            debug!("Non-finite emission origin {:?}, falling back to (0, 0)", origin);
            Vec2::ZERO
        };
    }

    fn emission_origin(&self) -> Vec2 {
        self.emission_origin
    }

    fn live_count(&self) -> usize {
        self.particles.len()
    }

    fn reload_config(&mut self, config: &PhysicConfig) -> bool {
        let burst_count_updated = config.burst_count != self.config.burst_count;
        self.config = config.clone();
        self.palette = SparklePalette::from_config(config);
        burst_count_updated
    }

    fn get_config(&self) -> &PhysicConfig {
        &self.config
    }

    fn close(&mut self) {
        self.particles.clear();
        debug!("PhysicEngineSparkles closed and reset.");
    }

    fn as_physic_engine(&self) -> &dyn PhysicEngine {
        self
    }
}

impl<R: Rng> PhysicEngineFull for PhysicEngineSparkles<R> {}

// ==================================
// Helpers pour tests
// ==================================
#[cfg(any(test, feature = "test_helpers"))]
pub trait PhysicEngineTestHelpers {
    /// Injecte `n` particules à l'origine courante sans toucher à l'état
    /// d'activation.
    fn force_spawn(&mut self, n: usize);
    fn particles(&self) -> &[Particle];
}

#[cfg(any(test, feature = "test_helpers"))]
impl<R: Rng> PhysicEngineTestHelpers for PhysicEngineSparkles<R> {
    fn force_spawn(&mut self, n: usize) {
        for _ in 0..n {
            self.spawn_at_origin(self.config.ambient_primary_weight);
        }
    }

    fn particles(&self) -> &[Particle] {
        &self.particles
    }
}
