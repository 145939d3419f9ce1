//! Web layer for the arrival board.
//!
//! Serves the classified board as JSON on `/halltider` and auxiliary
//! assets under `/static`.

mod routes;
mod state;

pub use routes::{AppError, create_router};
pub use state::AppState;
