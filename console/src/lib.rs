//! Web console for the car movies API.
//!
//! # Overview
//! Serves a single server-rendered page: a paged table of movies with
//! single-row selection, an edit form and a status message. Every button
//! posts an action that is applied to the shared `movies_core::Console`;
//! API calls run through a blocking ureq transport on tokio's blocking pool.

pub mod config;
pub mod routes;
pub mod state;
pub mod transport;
pub mod view;

pub use config::{ConfigError, ConsoleConfig};
pub use routes::router;
pub use state::{AppError, AppState};
pub use transport::{TransportError, UreqTransport};
