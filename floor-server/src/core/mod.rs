//! Core module - configuration, state and server assembly

pub mod config;
pub mod events;
pub mod server;
pub mod state;

pub use config::Config;
pub use events::FloorEvents;
pub use server::Server;
pub use state::ServerState;
