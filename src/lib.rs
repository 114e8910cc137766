pub mod config;
pub mod entities;
pub mod error;
pub mod game;
pub mod input;
pub mod math;
pub mod render;
pub mod world;
