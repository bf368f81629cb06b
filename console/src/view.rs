//! Server-side rendering of the console page.
//!
//! The page is one HTML document: the movie table with per-row select
//! buttons and pagination, the edit form whose three buttons post to
//! `/save`, `/delete` and `/clear`, and the status message.

use std::fmt::Write;

use movies_core::{ConsoleState, NoticeKind};

const STYLE: &str = r#"
body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background: #f0f2f5; min-height: 100vh; padding: 40px; margin: 0; }
.card { max-width: 900px; margin: auto; background: white; border-radius: 10px; box-shadow: 0 4px 20px rgba(0,0,0,0.1); padding: 30px; }
h1 { text-align: center; color: #003366; margin-bottom: 40px; }
h3 { color: #003366; margin-bottom: 20px; }
table { width: 100%; border-collapse: collapse; }
th { background: #003366; color: white; font-weight: bold; font-size: 16px; text-align: left; padding: 8px; }
td { padding: 8px; font-size: 14px; border-bottom: 1px solid #eee; }
tr:nth-child(even) td { background: #f9f9f9; }
tr.selected td { background: #d0e1f9; }
.pager { margin-top: 10px; display: flex; gap: 15px; align-items: center; }
.editor { display: flex; align-items: center; }
.editor input { padding: 10px; margin-right: 15px; border-radius: 5px; border: 1px solid #ccc; font-size: 14px; }
.editor input[name=name] { width: 40%; }
.editor input[type=number] { width: 15%; }
button { color: white; border: none; padding: 12px 25px; border-radius: 5px; font-weight: bold; cursor: pointer; }
button.save { background: #007BFF; }
button.delete { background: #dc3545; margin-left: 10px; }
button.clear { background: #6c757d; margin-left: 10px; }
button.select { background: #003366; padding: 4px 10px; }
.message { margin-top: 20px; font-weight: bold; }
.message.success { color: #1e7e34; }
.message.warning { color: #b8860b; }
.message.error { color: #c82333; }
"#;

/// Render the whole page for the current console state.
pub fn render_page(state: &ConsoleState) -> String {
    let mut html = String::with_capacity(8 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Cars Movies Dashboard</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<div class=\"card\">\n<h1>Cars Movies Dashboard</h1>\n");
    render_table(&mut html, state);
    render_editor(&mut html, state);
    render_message(&mut html, state);
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_table(html: &mut String, state: &ConsoleState) {
    let table = &state.table;
    let (first, rows) = table.page_rows();

    html.push_str("<table id=\"movies-table\">\n<thead><tr><th></th><th>ID</th><th>Name</th><th>Year</th><th>Duration (min)</th></tr></thead>\n<tbody>\n");
    for (offset, movie) in rows.iter().enumerate() {
        let index = first + offset;
        let selected = table.selected() == Some(index);
        // Selecting the selected row again clears the selection.
        let target = if selected { String::new() } else { index.to_string() };
        let _ = write!(
            html,
            "<tr{class}><td><form method=\"post\" action=\"/select\"><input type=\"hidden\" name=\"row\" value=\"{target}\"><button class=\"select\" type=\"submit\">{label}</button></form></td><td>{id}</td><td>{name}</td><td>{year}</td><td>{duration}</td></tr>\n",
            class = if selected { " class=\"selected\"" } else { "" },
            label = if selected { "&#9673;" } else { "&#9675;" },
            id = escape(movie.id.as_str()),
            name = escape(&movie.name),
            year = movie.year,
            duration = movie.duration_minutes,
        );
    }
    html.push_str("</tbody>\n</table>\n");

    let page = table.page();
    let count = table.page_count();
    html.push_str("<div class=\"pager\">");
    if page > 0 {
        let _ = write!(html, "<a href=\"/?page={page}\">&laquo; Previous</a>");
    }
    let _ = write!(html, "<span>Page {} of {count}</span>", page + 1);
    if page + 1 < count {
        let _ = write!(html, "<a href=\"/?page={}\">Next &raquo;</a>", page + 2);
    }
    html.push_str("</div>\n");
}

fn render_editor(html: &mut String, state: &ConsoleState) {
    let form = &state.form;
    let _ = write!(
        html,
        concat!(
            "<div style=\"margin-top: 40px\">\n<h3>Add / Update Movie</h3>\n",
            "<form class=\"editor\" method=\"post\" action=\"/save\">\n",
            "<input type=\"hidden\" name=\"id\" value=\"{id}\">\n",
            "<input type=\"text\" name=\"name\" placeholder=\"Movie Name\" value=\"{name}\">\n",
            "<input type=\"number\" name=\"year\" placeholder=\"Year\" value=\"{year}\">\n",
            "<input type=\"number\" name=\"duration\" placeholder=\"Duration (min)\" value=\"{duration}\">\n",
            "<button class=\"save\" type=\"submit\" formaction=\"/save\">Save</button>\n",
            "<button class=\"delete\" type=\"submit\" formaction=\"/delete\">Delete</button>\n",
            "<button class=\"clear\" type=\"submit\" formaction=\"/clear\">Clear</button>\n",
            "</form>\n</div>\n",
        ),
        id = escape(&form.id),
        name = escape(&form.name),
        year = escape(&form.year),
        duration = escape(&form.duration),
    );
}

fn render_message(html: &mut String, state: &ConsoleState) {
    match &state.notice {
        Some(notice) => {
            let (class, icon) = match notice.kind {
                NoticeKind::Success => ("success", "&#10004;"),
                NoticeKind::Warning => ("warning", "&#9888;"),
                NoticeKind::Error => ("error", "&#10060;"),
            };
            let _ = writeln!(
                html,
                "<div id=\"message\" class=\"message {class}\">{icon} {}</div>",
                escape(&notice.text)
            );
        }
        None => html.push_str("<div id=\"message\" class=\"message\"></div>\n"),
    }
}

/// Escape text for use in element content and double-quoted attributes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
