//! Web layer for the subway router.
//!
//! Provides JSON HTTP endpoints for station lookup, routing and fares.
//! Handlers only translate between HTTP and the core modules.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, ENDPOINTS, create_router};
pub use state::AppState;
