//! Server-rendered views, plain markup with no template engine.

use std::fmt::Write;

use chrono::NaiveDate;
use storage::models::{Event, Registration};

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

pub fn events_page(events: &[Event], today: NaiveDate) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<p>Today: {}</p>", today);
    let _ = writeln!(body, "<p>Total events: {}</p>", events.len());

    if events.is_empty() {
        body.push_str("<p>No events scheduled.</p>\n");
        return page("Upcoming Events", &body);
    }

    body.push_str(
        "<table>\n<tr><th>Event</th><th>Council</th><th>Dates</th><th>Venue</th><th>Registration</th></tr>\n",
    );
    for event in events {
        let status = if event.is_registration_open(today) {
            format!(
                "<form method=\"post\" action=\"/event/{id}/register\">\
                 <input name=\"name\" placeholder=\"Name\" required>\
                 <input name=\"class_name\" placeholder=\"Class\" required>\
                 <input name=\"year\" placeholder=\"Year\" required>\
                 <input name=\"roll_no\" placeholder=\"Roll no\" required>\
                 <button type=\"submit\">Register</button></form>",
                id = event.id
            )
        } else {
            "Closed".to_string()
        };

        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{} to {}</td><td>{}</td><td>{}</td></tr>",
            escape(&event.name),
            escape(&event.council),
            event.start_date,
            event.end_date,
            escape(&event.venue),
            status
        );
    }
    body.push_str("</table>\n");

    page("Upcoming Events", &body)
}

pub fn registrations_page(registrations: &[Registration]) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "<p>Total registrations: {}</p>", registrations.len());

    if registrations.is_empty() {
        body.push_str("<p>No registrations yet.</p>\n");
        return page("Registrations", &body);
    }

    body.push_str(
        "<table>\n<tr><th>Registered at</th><th>Event</th><th>Council</th><th>Name</th>\
         <th>Class</th><th>Year</th><th>Roll no</th></tr>\n",
    );
    for registration in registrations {
        let _ = writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            registration.created_at.format("%Y-%m-%d %H:%M:%S"),
            escape(&registration.event_name),
            escape(&registration.council),
            escape(&registration.name),
            escape(&registration.class_name),
            registration.year,
            escape(&registration.roll_no)
        );
    }
    body.push_str("</table>\n");

    page("Registrations", &body)
}
