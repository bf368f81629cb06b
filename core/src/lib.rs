//! Sans-IO core of the car movies console.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the
//! `/carsmovies` REST API without touching the network, and holds the
//! console's table, form and status state behind an event-driven controller.
//!
//! # Design
//! - `MovieClient` is stateless; it holds only `base_url`.
//! - Each CRUD operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit.
//! - `Console` is a reducer: UI events in, at most one request out. The host
//!   executes requests through a `Transport` and feeds outcomes back.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod console;
pub mod error;
pub mod http;
pub mod state;
pub mod types;

pub use client::MovieClient;
pub use console::{run, Console, ConsoleState, Event, Phase};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use state::{EditForm, FormError, Notice, NoticeKind, TableView, PAGE_SIZE};
pub use types::{ListQuery, MovieId, MovieList, MoviePayload, MovieRecord, SortDirection, SortField};
