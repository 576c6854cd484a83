//! HTTP service exposing graph generation, queries and engine comparison

pub mod api;
pub mod models;
pub mod server;

pub use api::{create_router, AppState, GenerationLimits};
pub use server::{build_app, start_server, start_server_with_config, ServerConfig};
