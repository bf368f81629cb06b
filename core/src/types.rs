//! Domain DTOs for the car movies API.
//!
//! # Design
//! These types mirror the `/carsmovies` wire schema (`carMovieName`,
//! `carMovieYear`, `duration`) but expose Rust-style field names. They are
//! defined independently from the mock-server crate; integration tests catch
//! schema drift between the two.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned record identifier.
///
/// The hosted API has used both numeric and string ids, so any JSON string or
/// integer is accepted and kept as text. The client never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MovieId(String);

impl MovieId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Signed(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => MovieId(s),
            RawId::Signed(n) => MovieId(n.to_string()),
            RawId::Unsigned(n) => MovieId(n.to_string()),
        })
    }
}

/// A single car movie as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub id: MovieId,
    #[serde(rename = "carMovieName")]
    pub name: String,
    #[serde(rename = "carMovieYear")]
    pub year: i32,
    #[serde(rename = "duration")]
    pub duration_minutes: i32,
}

/// Request payload for creating or updating a movie. Updates resend every
/// field; the id travels in the URL path, never in the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoviePayload {
    #[serde(rename = "carMovieName")]
    pub name: String,
    #[serde(rename = "carMovieYear")]
    pub year: i32,
    #[serde(rename = "duration")]
    pub duration_minutes: i32,
}

impl MovieRecord {
    pub fn payload(&self) -> MoviePayload {
        MoviePayload {
            name: self.name.clone(),
            year: self.year,
            duration_minutes: self.duration_minutes,
        }
    }
}

/// Envelope of the list endpoint: `{ "Movies": [...] }`.
///
/// A response without the `Movies` key is an empty list. Entries are kept as
/// raw JSON so one malformed row cannot take the whole table down.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieList {
    #[serde(rename = "Movies", default)]
    pub movies: Vec<serde_json::Value>,
}

impl MovieList {
    /// Decode every well-formed entry, logging and skipping the rest.
    pub fn into_records(self) -> Vec<MovieRecord> {
        self.movies
            .into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match serde_json::from_value::<MovieRecord>(raw) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(index, error = %err, "skipping malformed movie entry");
                    None
                }
            })
            .collect()
    }
}

/// Column the server sorts the list by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Name,
    Year,
    Duration,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "carMovieName",
            SortField::Year => "carMovieYear",
            SortField::Duration => "duration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Paging and ordering of a list call.
///
/// The default asks for the first 100 movies, newest first, which is what the
/// console loads into its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub size: u32,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 100,
            sort: SortField::Year,
            direction: SortDirection::Desc,
        }
    }
}

impl ListQuery {
    pub fn query_string(&self) -> String {
        format!(
            "page={}&size={}&sort={},{}",
            self.page,
            self.size,
            self.sort.as_str(),
            self.direction.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_wire_field_names() {
        let record = MovieRecord {
            id: MovieId::new("7"),
            name: "Rush".to_string(),
            year: 2013,
            duration_minutes: 123,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["carMovieName"], "Rush");
        assert_eq!(json["carMovieYear"], 2013);
        assert_eq!(json["duration"], 123);
    }

    #[test]
    fn numeric_id_is_kept_as_text() {
        let record: MovieRecord = serde_json::from_str(
            r#"{"id":42,"carMovieName":"Cars","carMovieYear":2006,"duration":117}"#,
        )
        .unwrap();
        assert_eq!(record.id.as_str(), "42");
    }

    #[test]
    fn payload_has_no_id() {
        let payload = MoviePayload {
            name: "Ford v Ferrari".to_string(),
            year: 2019,
            duration_minutes: 152,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["carMovieName"], "Ford v Ferrari");
    }

    #[test]
    fn list_without_movies_key_is_empty() {
        let list: MovieList = serde_json::from_str(r#"{"TotalItems":0}"#).unwrap();
        assert!(list.movies.is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let list: MovieList = serde_json::from_str(
            r#"{"Movies":[
                {"id":1,"carMovieName":"Rush","carMovieYear":2013,"duration":123},
                {"id":2,"carMovieName":"Untitled","carMovieYear":null,"duration":90},
                {"id":3,"carMovieName":"Cars","carMovieYear":2006}
            ]}"#,
        )
        .unwrap();
        let records = list.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Rush");
    }

    #[test]
    fn default_query_sorts_by_year_descending() {
        assert_eq!(
            ListQuery::default().query_string(),
            "page=0&size=100&sort=carMovieYear,desc"
        );
    }
}
