//! Stateless HTTP request builder and response parser for the car movies API.
//!
//! # Design
//! `MovieClient` holds only a `base_url` and carries no mutable state between
//! calls. Each CRUD operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ListQuery, MovieId, MovieList, MoviePayload, MovieRecord};

/// Synchronous, stateless client for the `/carsmovies` API.
#[derive(Debug, Clone)]
pub struct MovieClient {
    base_url: String,
}

impl MovieClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_movies(&self, query: &ListQuery) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/carsmovies?{}", self.base_url, query.query_string()),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_movie(&self, input: &MoviePayload) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/carsmovies", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_update_movie(&self, id: &MovieId, input: &MoviePayload) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/carsmovies/{id}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn build_delete_movie(&self, id: &MovieId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/carsmovies/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_movies(&self, response: HttpResponse) -> Result<Vec<MovieRecord>, ApiError> {
        check_status(&response, 200)?;
        let list: MovieList =
            serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))?;
        Ok(list.into_records())
    }

    /// Creation is judged by status alone; the body of a 201 is not relied on.
    pub fn parse_create_movie(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 201)
    }

    pub fn parse_update_movie(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 200)
    }

    pub fn parse_delete_movie(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound {
            body: response.body.clone(),
        });
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}
