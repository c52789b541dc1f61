pub mod r#trait;
pub use r#trait::{WindowEngine, WindowSignal};

pub mod glfw_window_engine;
pub use glfw_window_engine::GlfwWindowEngine;
