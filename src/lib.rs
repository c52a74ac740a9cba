pub mod camera;
pub mod document;
pub mod error;
pub mod loader;
pub mod player;
pub mod projector;
pub mod scene;
pub mod separation;
pub mod session;

pub mod cli;
