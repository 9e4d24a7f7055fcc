//! Banana Catcher - A single-screen catching arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, falling objects, spawning, scoring)
//! - `renderer`: Frame composition and the WebGPU pipeline
//! - `platform`: Host-independent frame pacing
//! - `game`: Host driver tying input, simulation, audio and rendering together
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::Settings;
pub use tuning::GameConfig;
