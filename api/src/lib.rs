//! # Keystone HTTP API
//!
//! actix-web surface over the Keystone core: registration, login, refresh-token
//! rotation, logout, and a sample route guarded by the bearer-token gate.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::create_app;
pub use routes::AppState;
