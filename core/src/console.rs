//! The console controller: a reducer from UI events to state transitions.
//!
//! # Design
//! `Console` owns every piece of mutable UI state (`ConsoleState`). Each user
//! action is an `Event`; `Console::handle` applies it and may hand back the
//! next `HttpRequest` to execute. The outcome of that request re-enters as
//! `Event::Response` or `Event::TransportFailed`, so in-flight operations are
//! explicit states rather than suspended callbacks. `run` drives the loop
//! with any `Transport`.
//!
//! Every mutation is followed by a full list re-fetch; rows are never patched
//! locally.

use tracing::{debug, info, warn};

use crate::client::MovieClient;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::state::{EditForm, FormError, Notice, TableView};
use crate::types::{ListQuery, MovieId};

pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields.";
pub const MSG_NUMBERS_REQUIRED: &str = "Year and duration must be whole numbers.";
pub const MSG_SELECT_TO_DELETE: &str = "Select a movie to delete.";
pub const MSG_CREATED: &str = "Movie created successfully.";
pub const MSG_UPDATED: &str = "Movie updated successfully.";
pub const MSG_DELETED: &str = "Movie deleted successfully.";

/// A user action or the outcome of a request the console asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A table row was selected by absolute index, or the selection cleared.
    RowSelected(Option<usize>),
    /// The user typed into the edit form.
    FormEdited(EditForm),
    SavePressed,
    DeletePressed,
    ClearPressed,
    PageChanged(usize),
    /// Reload the table without any mutation, e.g. on start-up.
    RefreshRequested,
    /// The response to the request returned by the previous `handle` call.
    Response(HttpResponse),
    /// The previous request never produced a response.
    TransportFailed(String),
}

/// Coarse view of what the console is doing, derived from its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Selected,
    Editing,
    Saving,
    Deleting,
    Refreshing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mutation {
    Create,
    Update(MovieId),
    Delete(MovieId),
}

impl Mutation {
    fn success_text(&self) -> &'static str {
        match self {
            Mutation::Create => MSG_CREATED,
            Mutation::Update(_) => MSG_UPDATED,
            Mutation::Delete(_) => MSG_DELETED,
        }
    }

    fn failure_text(&self, detail: &str) -> String {
        match self {
            Mutation::Create => format!("Error creating movie: {detail}"),
            Mutation::Update(_) => format!("Error updating movie: {detail}"),
            Mutation::Delete(_) => format!("Error deleting movie: {detail}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Mutation(Mutation),
    Refresh,
}

/// Everything the page renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsoleState {
    pub table: TableView,
    pub form: EditForm,
    pub notice: Option<Notice>,
    pending: Option<Pending>,
}

impl ConsoleState {
    pub fn phase(&self) -> Phase {
        match &self.pending {
            Some(Pending::Mutation(Mutation::Delete(_))) => return Phase::Deleting,
            Some(Pending::Mutation(_)) => return Phase::Saving,
            Some(Pending::Refresh) => return Phase::Refreshing,
            None => {}
        }
        match self.table.selected_row() {
            Some(row) if EditForm::from_record(row) == self.form => Phase::Selected,
            Some(_) => Phase::Editing,
            None if self.form.is_empty() => Phase::Idle,
            None => Phase::Editing,
        }
    }
}

/// Controller binding the API client to the console state.
#[derive(Debug, Clone)]
pub struct Console {
    client: MovieClient,
    query: ListQuery,
    state: ConsoleState,
}

impl Console {
    pub fn new(client: MovieClient, query: ListQuery) -> Self {
        Self {
            client,
            query,
            state: ConsoleState::default(),
        }
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Apply one event. Returns the request the host must execute next, if
    /// any; its outcome is fed back through `Event::Response` or
    /// `Event::TransportFailed`.
    ///
    /// A new action while a request is outstanding replaces the pending
    /// operation; whichever response arrives last decides the final state.
    pub fn handle(&mut self, event: Event) -> Option<HttpRequest> {
        match event {
            Event::RowSelected(index) => {
                self.state.form = self
                    .state
                    .table
                    .select(index)
                    .map(EditForm::from_record)
                    .unwrap_or_default();
                None
            }
            Event::FormEdited(form) => {
                self.state.form = form;
                None
            }
            Event::SavePressed => self.save(),
            Event::DeletePressed => self.delete(),
            Event::ClearPressed => {
                self.state.form = EditForm::default();
                self.state.notice = None;
                None
            }
            Event::PageChanged(page) => {
                self.state.table.set_page(page);
                None
            }
            Event::RefreshRequested => Some(self.refresh()),
            Event::Response(response) => self.complete(Ok(response)),
            Event::TransportFailed(reason) => self.complete(Err(reason)),
        }
    }

    fn save(&mut self) -> Option<HttpRequest> {
        let payload = match self.state.form.payload() {
            Ok(payload) => payload,
            Err(err) => {
                debug!(error = %err, "save rejected by form validation");
                let text = match err {
                    FormError::MissingField(_) => MSG_FILL_ALL_FIELDS,
                    FormError::NotANumber { .. } => MSG_NUMBERS_REQUIRED,
                };
                self.state.notice = Some(Notice::warning(text));
                return None;
            }
        };

        let (mutation, built) = match self.state.form.movie_id() {
            Some(id) => {
                let built = self.client.build_update_movie(&id, &payload);
                (Mutation::Update(id), built)
            }
            None => (Mutation::Create, self.client.build_create_movie(&payload)),
        };
        match built {
            Ok(request) => {
                info!(method = %request.method, path = %request.path, "saving movie");
                self.state.pending = Some(Pending::Mutation(mutation));
                Some(request)
            }
            Err(err) => {
                self.state.notice = Some(Notice::error(mutation.failure_text(&err.message())));
                None
            }
        }
    }

    fn delete(&mut self) -> Option<HttpRequest> {
        let Some(id) = self.state.form.movie_id() else {
            self.state.notice = Some(Notice::warning(MSG_SELECT_TO_DELETE));
            return None;
        };
        let request = self.client.build_delete_movie(&id);
        info!(path = %request.path, "deleting movie");
        self.state.pending = Some(Pending::Mutation(Mutation::Delete(id)));
        Some(request)
    }

    fn refresh(&mut self) -> HttpRequest {
        self.state.pending = Some(Pending::Refresh);
        self.client.build_list_movies(&self.query)
    }

    fn complete(&mut self, outcome: Result<HttpResponse, String>) -> Option<HttpRequest> {
        let Some(pending) = self.state.pending.take() else {
            warn!("ignoring response with no operation in flight");
            return None;
        };

        let mutation = match pending {
            Pending::Refresh => {
                let rows = outcome
                    .and_then(|response| self.client.parse_list_movies(response).map_err(|e| e.to_string()))
                    .unwrap_or_else(|reason| {
                        warn!(%reason, "failed to load movies, showing an empty table");
                        Vec::new()
                    });
                debug!(count = rows.len(), "movies loaded");
                self.state.table.replace_rows(rows);
                return None;
            }
            Pending::Mutation(mutation) => mutation,
        };

        let result = outcome.and_then(|response| {
            match &mutation {
                Mutation::Create => self.client.parse_create_movie(response),
                Mutation::Update(_) => self.client.parse_update_movie(response),
                Mutation::Delete(_) => self.client.parse_delete_movie(response),
            }
            .map_err(|e| e.message())
        });

        match result {
            Ok(()) => {
                info!(?mutation, "movie change applied");
                self.state.notice = Some(Notice::success(mutation.success_text()));
                if matches!(mutation, Mutation::Delete(_)) {
                    self.state.form = EditForm::default();
                }
                Some(self.refresh())
            }
            Err(detail) => {
                warn!(?mutation, %detail, "movie change failed");
                self.state.notice = Some(Notice::error(mutation.failure_text(&detail)));
                // A failed delete leaves table and form exactly as they were.
                match mutation {
                    Mutation::Delete(_) => None,
                    _ => Some(self.refresh()),
                }
            }
        }
    }
}

/// Apply `event` and execute every request it leads to until the console is
/// idle again.
pub fn run<T: Transport>(console: &mut Console, transport: &T, event: Event) {
    let mut next = console.handle(event);
    while let Some(request) = next {
        let event = match transport.execute(request) {
            Ok(response) => Event::Response(response),
            Err(err) => Event::TransportFailed(err.to_string()),
        };
        next = console.handle(event);
    }
}
