// Presentation layer: terminal shell over the engine.

pub mod export;
pub mod render;
pub mod shell;
