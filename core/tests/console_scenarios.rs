//! Controller behaviour driven through a scripted, recording transport.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;

use movies_core::console::{MSG_CREATED, MSG_DELETED, MSG_FILL_ALL_FIELDS, MSG_SELECT_TO_DELETE, MSG_UPDATED};
use movies_core::{
    run, Console, EditForm, Event, HttpMethod, HttpRequest, HttpResponse, ListQuery, MovieClient, NoticeKind,
};

const BASE: &str = "http://api.test/api/v1";

const TWO_MOVIES: &str = r#"{"Movies":[
    {"id":11,"carMovieName":"Rush","carMovieYear":2013,"duration":123},
    {"id":12,"carMovieName":"Cars","carMovieYear":2006,"duration":117}
]}"#;

const THREE_MOVIES: &str = r#"{"Movies":[
    {"id":13,"carMovieName":"Fast X","carMovieYear":2023,"duration":141},
    {"id":11,"carMovieName":"Rush","carMovieYear":2013,"duration":123},
    {"id":12,"carMovieName":"Cars","carMovieYear":2006,"duration":117}
]}"#;

/// Replies with queued responses in order and records every request.
#[derive(Default)]
struct ScriptedTransport {
    responses: RefCell<VecDeque<HttpResponse>>,
    requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    fn reply(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(HttpResponse::new(status, body));
        self
    }

    fn take_requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow_mut().drain(..).collect()
    }
}

impl movies_core::Transport for ScriptedTransport {
    type Error = Infallible;

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, Infallible> {
        self.requests.borrow_mut().push(request.clone());
        let response = self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected request: {} {}", request.method, request.path));
        Ok(response)
    }
}

fn loaded() -> Console {
    let mut console = Console::new(MovieClient::new(BASE), ListQuery::default());
    let transport = ScriptedTransport::default().reply(200, TWO_MOVIES);
    run(&mut console, &transport, Event::RefreshRequested);
    assert_eq!(console.state().table.rows().len(), 2);
    console
}

fn form(id: &str, name: &str, year: &str, duration: &str) -> EditForm {
    EditForm {
        id: id.to_string(),
        name: name.to_string(),
        year: year.to_string(),
        duration: duration.to_string(),
    }
}

fn notice_text(console: &Console) -> Option<&str> {
    console.state().notice.as_ref().map(|n| n.text.as_str())
}

#[test]
fn selecting_a_row_copies_its_fields() {
    let mut console = loaded();
    let transport = ScriptedTransport::default();

    run(&mut console, &transport, Event::RowSelected(Some(1)));
    assert_eq!(console.state().form, form("12", "Cars", "2006", "117"));
    assert!(transport.take_requests().is_empty());
}

#[test]
fn selecting_nothing_clears_the_form() {
    let mut console = loaded();
    let transport = ScriptedTransport::default();

    run(&mut console, &transport, Event::RowSelected(Some(0)));
    run(&mut console, &transport, Event::RowSelected(None));
    assert_eq!(console.state().form, EditForm::default());
    assert_eq!(console.state().table.selected(), None);
}

#[test]
fn save_with_missing_field_never_calls_the_api() {
    for incomplete in [
        form("", "", "2023", "141"),
        form("", "Fast X", "", "141"),
        form("", "Fast X", "2023", " "),
        form("11", "Rush", "2013", ""),
    ] {
        let mut console = loaded();
        let transport = ScriptedTransport::default();
        let rows_before = console.state().table.rows().to_vec();

        run(&mut console, &transport, Event::FormEdited(incomplete));
        run(&mut console, &transport, Event::SavePressed);

        assert!(transport.take_requests().is_empty());
        assert_eq!(console.state().notice.as_ref().map(|n| n.kind), Some(NoticeKind::Warning));
        assert_eq!(notice_text(&console), Some(MSG_FILL_ALL_FIELDS));
        assert_eq!(console.state().table.rows(), rows_before.as_slice());
    }
}

#[test]
fn save_with_zero_duration_never_calls_the_api() {
    for zeroed in [form("", "Fast X", "2023", "0"), form("", "Fast X", "0", "141")] {
        let mut console = loaded();
        let transport = ScriptedTransport::default();

        run(&mut console, &transport, Event::FormEdited(zeroed));
        run(&mut console, &transport, Event::SavePressed);

        assert!(transport.take_requests().is_empty());
        assert_eq!(notice_text(&console), Some(MSG_FILL_ALL_FIELDS));
    }
}

#[test]
fn blank_name_is_sent_as_typed() {
    let mut console = loaded();
    let transport = ScriptedTransport::default()
        .reply(201, "{}")
        .reply(200, TWO_MOVIES);

    run(&mut console, &transport, Event::FormEdited(form("", "   ", "2023", "141")));
    run(&mut console, &transport, Event::SavePressed);

    let requests = transport.take_requests();
    assert_eq!(requests[0].method, HttpMethod::Post);
    let body: serde_json::Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["carMovieName"], "   ");
    assert_eq!(notice_text(&console), Some(MSG_CREATED));
}

#[test]
fn save_without_id_creates_then_refreshes() {
    let mut console = loaded();
    let transport = ScriptedTransport::default()
        .reply(201, r#"{"id":13}"#)
        .reply(200, THREE_MOVIES);

    run(&mut console, &transport, Event::FormEdited(form("", "Fast X", "2023", "141")));
    run(&mut console, &transport, Event::SavePressed);

    let requests = transport.take_requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].path, format!("{BASE}/carsmovies"));
    let body: serde_json::Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"carMovieName": "Fast X", "carMovieYear": 2023, "duration": 141})
    );
    assert_eq!(requests[1].method, HttpMethod::Get);
    assert_eq!(
        requests[1].path,
        format!("{BASE}/carsmovies?page=0&size=100&sort=carMovieYear,desc")
    );

    assert_eq!(notice_text(&console), Some(MSG_CREATED));
    assert!(console.state().table.rows().iter().any(|m| m.name == "Fast X"));
}

#[test]
fn failed_create_shows_raw_body_and_still_refreshes() {
    let mut console = loaded();
    let transport = ScriptedTransport::default()
        .reply(400, "carMovieYear must be after 1888")
        .reply(200, TWO_MOVIES);

    run(&mut console, &transport, Event::FormEdited(form("", "Roundhay", "1800", "1")));
    run(&mut console, &transport, Event::SavePressed);

    assert_eq!(transport.take_requests().len(), 2);
    assert_eq!(console.state().notice.as_ref().map(|n| n.kind), Some(NoticeKind::Error));
    assert_eq!(
        notice_text(&console),
        Some("Error creating movie: carMovieYear must be after 1888")
    );
}

#[test]
fn save_with_id_updates_then_refreshes() {
    let mut console = loaded();
    let transport = ScriptedTransport::default().reply(200, "{}").reply(200, TWO_MOVIES);

    run(&mut console, &transport, Event::RowSelected(Some(0)));
    let mut edited = console.state().form.clone();
    edited.duration = "124".to_string();
    run(&mut console, &transport, Event::FormEdited(edited));
    run(&mut console, &transport, Event::SavePressed);

    let requests = transport.take_requests();
    assert_eq!(requests[0].method, HttpMethod::Put);
    assert_eq!(requests[0].path, format!("{BASE}/carsmovies/11"));
    assert_eq!(requests[1].method, HttpMethod::Get);
    assert_eq!(notice_text(&console), Some(MSG_UPDATED));
}

#[test]
fn failed_update_still_refreshes() {
    let mut console = loaded();
    let transport = ScriptedTransport::default()
        .reply(500, "database unavailable")
        .reply(200, TWO_MOVIES);

    run(&mut console, &transport, Event::FormEdited(form("11", "Rush", "2013", "123")));
    run(&mut console, &transport, Event::SavePressed);

    assert_eq!(transport.take_requests().len(), 2);
    assert_eq!(notice_text(&console), Some("Error updating movie: database unavailable"));
}

#[test]
fn delete_without_id_never_calls_the_api() {
    let mut console = loaded();
    let transport = ScriptedTransport::default();

    run(&mut console, &transport, Event::FormEdited(form("", "Rush", "2013", "123")));
    run(&mut console, &transport, Event::DeletePressed);

    assert!(transport.take_requests().is_empty());
    assert_eq!(notice_text(&console), Some(MSG_SELECT_TO_DELETE));
    assert_eq!(console.state().form.name, "Rush");
}

#[test]
fn successful_delete_clears_form_and_refreshes() {
    let mut console = loaded();
    let transport = ScriptedTransport::default()
        .reply(204, "")
        .reply(200, r#"{"Movies":[{"id":12,"carMovieName":"Cars","carMovieYear":2006,"duration":117}]}"#);

    run(&mut console, &transport, Event::RowSelected(Some(0)));
    run(&mut console, &transport, Event::DeletePressed);

    let requests = transport.take_requests();
    assert_eq!(requests[0].method, HttpMethod::Delete);
    assert_eq!(requests[0].path, format!("{BASE}/carsmovies/11"));
    assert_eq!(requests[1].method, HttpMethod::Get);
    assert_eq!(notice_text(&console), Some(MSG_DELETED));
    assert_eq!(console.state().form, EditForm::default());
    assert_eq!(console.state().table.rows().len(), 1);
}

#[test]
fn failed_delete_leaves_form_and_table_alone() {
    let mut console = loaded();
    let transport = ScriptedTransport::default().reply(409, "movie is referenced by a rental");

    run(&mut console, &transport, Event::RowSelected(Some(0)));
    let form_before = console.state().form.clone();
    let rows_before = console.state().table.rows().to_vec();
    run(&mut console, &transport, Event::DeletePressed);

    assert_eq!(transport.take_requests().len(), 1);
    assert_eq!(
        notice_text(&console),
        Some("Error deleting movie: movie is referenced by a rental")
    );
    assert_eq!(console.state().form, form_before);
    assert_eq!(console.state().table.rows(), rows_before.as_slice());
}

#[test]
fn clear_resets_form_and_message_only() {
    let mut console = loaded();
    let transport = ScriptedTransport::default();

    run(&mut console, &transport, Event::RowSelected(Some(1)));
    run(&mut console, &transport, Event::FormEdited(form("", "Cars", "2006", "")));
    run(&mut console, &transport, Event::SavePressed);
    assert!(console.state().notice.is_some());

    run(&mut console, &transport, Event::ClearPressed);
    assert_eq!(console.state().form, EditForm::default());
    assert!(console.state().notice.is_none());
    assert_eq!(console.state().table.rows().len(), 2);
    assert_eq!(console.state().table.selected(), Some(1));
    assert!(transport.take_requests().is_empty());
}
