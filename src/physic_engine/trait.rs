use crate::physic_engine::config::PhysicConfig;
use crate::physic_engine::particle::Particle;
use crate::physic_engine::types::{UpdateResult, Vec2};

pub trait PhysicEngineIterator {
    /// Retourne un itérateur sur les particules vivantes.
    ///
    /// `Box<dyn Iterator>` plutôt qu'un type concret : signature simple et
    /// stable, n'importe quel moteur peut l'implémenter quel que soit son
    /// pipeline d'itération interne.
    fn iter_live_particles<'a>(&'a self) -> Box<dyn Iterator<Item = &'a Particle> + 'a>;
}

/// Interface commune aux moteurs d'étincelles.
///
/// Permet au pilote de boucle (Simulator) et au renderer de manipuler un
/// moteur sans connaître son implémentation concrète, et aux tests de
/// substituer un double.
pub trait PhysicEngine {
    /// Avance la simulation d'une frame (le delta est implicitement une
    /// frame) : émission ambiante éventuelle, intégration, retrait des
    /// particules éteintes.
    fn update(&mut self) -> UpdateResult;

    /// Bascule le mode d'émission. Sur le front montant (inactif →
    /// actif), un burst unique de particules est créé immédiatement à
    /// l'origine courante, avant la frame suivante.
    fn set_active(&mut self, active: bool);

    fn is_active(&self) -> bool;

    /// Déplace l'origine d'émission. Des coordonnées non finies sont
    /// remplacées par (0, 0).
    fn set_emission_origin(&mut self, origin: Vec2);

    fn emission_origin(&self) -> Vec2;

    /// Nombre de particules actuellement vivantes.
    fn live_count(&self) -> usize;

    fn reload_config(&mut self, config: &PhysicConfig) -> bool;

    fn get_config(&self) -> &PhysicConfig;

    /// Ferme / libère le moteur physique.
    fn close(&mut self) {} // Par défaut, fait rien.

    /// Helper for upcasting from dyn PhysicEngineFull or other subtraits
    fn as_physic_engine(&self) -> &dyn PhysicEngine;
}

pub trait PhysicEngineFull: PhysicEngine + PhysicEngineIterator {}
