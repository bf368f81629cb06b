use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use movies_core::{run, Console, ConsoleState, Event, ListQuery, MovieClient};
use serde_json::json;
use tokio::sync::Mutex;

use crate::config::ConsoleConfig;
use crate::transport::UreqTransport;

/// Handler-level failures. Console actions themselves never fail; they end
/// in a status message. Only losing the worker task lands here.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("console task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Internal error");
        let body = json!({
            "error": "An internal error occurred",
            "code": "INTERNAL_ERROR",
        });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

/// Shared application state available to all handlers via `State<AppState>`.
///
/// One console is shared by every browser; actions are applied one at a
/// time under its lock.
#[derive(Clone)]
pub struct AppState {
    console: Arc<Mutex<Console>>,
    transport: Arc<UreqTransport>,
}

impl AppState {
    pub fn new(config: &ConsoleConfig) -> Self {
        let query = ListQuery {
            size: config.fetch_size,
            ..ListQuery::default()
        };
        let console = Console::new(MovieClient::new(&config.api_url), query);
        Self {
            console: Arc::new(Mutex::new(console)),
            transport: Arc::new(UreqTransport::new()),
        }
    }

    /// Apply `events` in order, running every API call they trigger on the
    /// blocking pool.
    pub async fn dispatch(&self, events: Vec<Event>) -> AppResult<()> {
        let console = Arc::clone(&self.console);
        let transport = Arc::clone(&self.transport);
        tokio::task::spawn_blocking(move || {
            let mut console = console.blocking_lock();
            for event in events {
                run(&mut console, &*transport, event);
            }
        })
        .await?;
        Ok(())
    }

    /// Switch the table page. Paging is client-side and never calls the API.
    pub async fn change_page(&self, page: usize) {
        let mut console = self.console.lock().await;
        let request = console.handle(Event::PageChanged(page));
        debug_assert!(request.is_none());
    }

    pub async fn snapshot(&self) -> ConsoleState {
        self.console.lock().await.state().clone()
    }
}
