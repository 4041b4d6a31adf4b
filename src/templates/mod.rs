//! Email templates for a visitor registration.
//!
//! Two messages go out per registration: a confirmation to the visitor and a
//! notification to the host. Both are plain string construction with no I/O;
//! the host notification takes its registration time as an argument so that
//! output is reproducible under a fixed [`Clock`].
//!
//! Every interpolated value is HTML-escaped in the `html` body. The `text`
//! body is sent as-is.

mod host;
mod visitor;

pub use host::host_notification;
pub use visitor::visitor_confirmation;

use chrono::{Local, NaiveDateTime};

/// Source of the wall-clock time stamped into host notifications.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Date and time as shown in emails, e.g.
/// `("Monday, January 15, 2024", "02:30 PM")`.
pub fn format_registration_time(at: NaiveDateTime) -> (String, String) {
    (
        at.format("%A, %B %-d, %Y").to_string(),
        at.format("%I:%M %p").to_string(),
    )
}

/// Escape text for inclusion in HTML element content or a quoted attribute.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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
