use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use movies_core::{EditForm, Event};
use serde::{Deserialize, Serialize};

use crate::state::{AppResult, AppState};
use crate::view::render_page;

/// Query of `GET /`; `page` is 1-based. Anything that is not a number
/// leaves the table on its current page.
#[derive(Deserialize)]
struct PageParams {
    #[serde(default)]
    page: String,
}

/// Body of `POST /select`. An empty or non-numeric `row` clears the selection.
#[derive(Deserialize)]
struct SelectParams {
    #[serde(default)]
    row: String,
}

/// The edit form as posted by the browser.
#[derive(Deserialize, Default)]
#[serde(default)]
struct FormFields {
    id: String,
    name: String,
    year: String,
    duration: String,
}

impl From<FormFields> for EditForm {
    fn from(fields: FormFields) -> Self {
        EditForm {
            id: fields.id,
            name: fields.name,
            year: fields.year,
            duration: fields.duration,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/select", post(select))
        .route("/save", post(save))
        .route("/delete", post(delete))
        .route("/clear", post(clear))
        .route("/health", get(health))
        .with_state(state)
}

async fn index(State(state): State<AppState>, Query(params): Query<PageParams>) -> Html<String> {
    if let Ok(page) = params.page.trim().parse::<usize>() {
        state.change_page(page.saturating_sub(1)).await;
    }
    Html(render_page(&state.snapshot().await))
}

async fn select(State(state): State<AppState>, Form(params): Form<SelectParams>) -> AppResult<Redirect> {
    let row = params.row.trim().parse().ok();
    state.dispatch(vec![Event::RowSelected(row)]).await?;
    Ok(Redirect::to("/"))
}

async fn save(State(state): State<AppState>, Form(fields): Form<FormFields>) -> AppResult<Redirect> {
    state
        .dispatch(vec![Event::FormEdited(fields.into()), Event::SavePressed])
        .await?;
    Ok(Redirect::to("/"))
}

async fn delete(State(state): State<AppState>, Form(fields): Form<FormFields>) -> AppResult<Redirect> {
    state
        .dispatch(vec![Event::FormEdited(fields.into()), Event::DeletePressed])
        .await?;
    Ok(Redirect::to("/"))
}

async fn clear(State(state): State<AppState>) -> AppResult<Redirect> {
    state.dispatch(vec![Event::ClearPressed]).await?;
    Ok(Redirect::to("/"))
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
