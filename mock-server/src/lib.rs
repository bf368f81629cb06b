use std::{cmp::Ordering, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    pub id: Uuid,
    #[serde(rename = "carMovieName")]
    pub name: String,
    #[serde(rename = "carMovieYear")]
    pub year: i32,
    pub duration: i32,
}

#[derive(Deserialize)]
pub struct MovieInput {
    #[serde(rename = "carMovieName")]
    pub name: String,
    #[serde(rename = "carMovieYear")]
    pub year: i32,
    pub duration: i32,
}

#[derive(Serialize, Deserialize)]
pub struct MoviePage {
    #[serde(rename = "Movies")]
    pub movies: Vec<Movie>,
}

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_size")]
    pub size: usize,
    pub sort: Option<String>,
}

fn default_size() -> usize {
    10
}

pub type Db = Arc<RwLock<Vec<Movie>>>;

type ApiResult<T> = Result<T, (StatusCode, String)>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router backed by a store pre-loaded with `movies`.
pub fn app_with(movies: Vec<Movie>) -> Router {
    let db: Db = Arc::new(RwLock::new(movies));
    Router::new()
        .route("/carsmovies", get(list_movies).post(create_movie))
        .route("/carsmovies/{id}", put(update_movie).delete(delete_movie))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_movies(State(db): State<Db>, Query(params): Query<ListParams>) -> ApiResult<Json<MoviePage>> {
    let mut movies = db.read().await.clone();
    if let Some(sort) = params.sort.as_deref() {
        let cmp = comparator(sort).ok_or_else(|| (StatusCode::BAD_REQUEST, format!("invalid sort: {sort}")))?;
        movies.sort_by(cmp);
    }
    let movies = movies
        .into_iter()
        .skip(params.page.saturating_mul(params.size))
        .take(params.size)
        .collect();
    Ok(Json(MoviePage { movies }))
}

/// Parse `field,dir` into an ordering over movies.
fn comparator(sort: &str) -> Option<impl Fn(&Movie, &Movie) -> Ordering> {
    let (field, dir) = sort.split_once(',').unwrap_or((sort, "asc"));
    let by: fn(&Movie, &Movie) -> Ordering = match field {
        "id" => |a, b| a.id.cmp(&b.id),
        "carMovieName" => |a, b| a.name.cmp(&b.name),
        "carMovieYear" => |a, b| a.year.cmp(&b.year),
        "duration" => |a, b| a.duration.cmp(&b.duration),
        _ => return None,
    };
    let descending = match dir {
        "asc" => false,
        "desc" => true,
        _ => return None,
    };
    Some(move |a: &Movie, b: &Movie| {
        let ord = by(a, b);
        if descending {
            ord.reverse()
        } else {
            ord
        }
    })
}

async fn create_movie(State(db): State<Db>, Json(input): Json<MovieInput>) -> (StatusCode, Json<Movie>) {
    let movie = Movie {
        id: Uuid::new_v4(),
        name: input.name,
        year: input.year,
        duration: input.duration,
    };
    tracing::debug!(id = %movie.id, name = %movie.name, "movie created");
    db.write().await.push(movie.clone());
    (StatusCode::CREATED, Json(movie))
}

async fn update_movie(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<MovieInput>,
) -> ApiResult<Json<Movie>> {
    let mut movies = db.write().await;
    let movie = movies.iter_mut().find(|m| m.id == id).ok_or_else(not_found)?;
    movie.name = input.name;
    movie.year = input.year;
    movie.duration = input.duration;
    Ok(Json(movie.clone()))
}

async fn delete_movie(State(db): State<Db>, Path(id): Path<Uuid>) -> ApiResult<StatusCode> {
    let mut movies = db.write().await;
    let index = movies.iter().position(|m| m.id == id).ok_or_else(not_found)?;
    movies.remove(index);
    Ok(StatusCode::NO_CONTENT)
}

fn not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Movie not found".to_string())
}
