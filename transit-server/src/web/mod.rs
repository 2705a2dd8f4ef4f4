//! Web layer for the transit recommender.
//!
//! Provides HTTP endpoints for mode recommendations and route map data.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
