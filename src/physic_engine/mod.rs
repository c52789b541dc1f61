pub mod r#trait;
pub use r#trait::{PhysicEngine, PhysicEngineFull, PhysicEngineIterator};

pub mod types;
pub use self::types::{AnchorRect, Color, UpdateResult, Vec2};

pub mod particle;
pub use self::particle::Particle;

pub mod palette;
pub use self::palette::SparklePalette;

pub mod config;
pub use self::config::PhysicConfig;

pub mod physic_engine_sparkles;
pub use self::physic_engine_sparkles::PhysicEngineSparkles;
