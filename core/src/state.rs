//! Table, form and status-message state owned by the console controller.

use crate::types::{MovieId, MoviePayload, MovieRecord};

/// Rows shown per table page.
pub const PAGE_SIZE: usize = 10;

/// The in-memory list of movies plus the single selected row.
///
/// `selected` is an absolute index into `rows`, not an index within the
/// current page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableView {
    rows: Vec<MovieRecord>,
    selected: Option<usize>,
    page: usize,
}

impl TableView {
    pub fn rows(&self) -> &[MovieRecord] {
        &self.rows
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&MovieRecord> {
        self.selected.and_then(|i| self.rows.get(i))
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages; an empty table still has one (empty) page.
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Rows of the current page together with the absolute index of the first.
    pub fn page_rows(&self) -> (usize, &[MovieRecord]) {
        let start = (self.page * PAGE_SIZE).min(self.rows.len());
        let end = (start + PAGE_SIZE).min(self.rows.len());
        (start, &self.rows[start..end])
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count() - 1);
    }

    /// Select a row by absolute index. Out-of-range indices select nothing.
    pub fn select(&mut self, index: Option<usize>) -> Option<&MovieRecord> {
        self.selected = index.filter(|&i| i < self.rows.len());
        self.selected_row()
    }

    /// Replace the whole list with a fresh copy from the server. Selection is
    /// dropped because indices no longer refer to the same records.
    pub fn replace_rows(&mut self, rows: Vec<MovieRecord>) {
        self.rows = rows;
        self.selected = None;
        self.set_page(self.page);
    }
}

/// Errors raised while turning the edit form into a request payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("{field} must be a whole number, got {value:?}")]
    NotANumber { field: &'static str, value: String },
}

/// The four edit fields, kept as the raw text the user typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub id: String,
    pub name: String,
    pub year: String,
    pub duration: String,
}

impl EditForm {
    pub fn from_record(record: &MovieRecord) -> Self {
        Self {
            id: record.id.to_string(),
            name: record.name.clone(),
            year: record.year.to_string(),
            duration: record.duration_minutes.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.name.is_empty() && self.year.is_empty() && self.duration.is_empty()
    }

    /// The id of the record being edited, if any. Blank means "new record".
    pub fn movie_id(&self) -> Option<MovieId> {
        let id = self.id.trim();
        (!id.is_empty()).then(|| MovieId::new(id))
    }

    /// Presence-check name, year and duration and build the wire payload.
    ///
    /// The name is sent exactly as typed. A year or duration of `0` counts as
    /// missing, like an empty box.
    pub fn payload(&self) -> Result<MoviePayload, FormError> {
        if self.name.is_empty() {
            return Err(FormError::MissingField("name"));
        }
        let year = required("year", &self.year)?;
        let duration = required("duration", &self.duration)?;
        Ok(MoviePayload {
            name: self.name.clone(),
            year: nonzero("year", number("year", year)?)?,
            duration_minutes: nonzero("duration", number("duration", duration)?)?,
        })
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(value)
}

fn number(field: &'static str, value: &str) -> Result<i32, FormError> {
    value.parse().map_err(|_| FormError::NotANumber {
        field,
        value: value.to_string(),
    })
}

fn nonzero(field: &'static str, value: i32) -> Result<i32, FormError> {
    if value == 0 {
        return Err(FormError::MissingField(field));
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// The status message area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}
