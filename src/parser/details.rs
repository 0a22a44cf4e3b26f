//! Extended sub-fields derived from timetable-style events.
//!
//! Timetable exports encode structured data in free text:
//!
//! ```text
//! SUMMARY:COM00023H-A Drop-in Session (Practical)
//! LOCATION:CSE/082, Computer Science Building
//! DESCRIPTION:Staff member(s): Kaul, Chaitanya\nWeek 3
//! ```
//!
//! - module: the first four characters of the summary, when followed by a space,
//! - kind: the text between the last `(` and the following `)`,
//! - room: the location up to the first `,`,
//! - staff: the rest of the description line starting with a keyword.

/// The first four characters, if the fifth one is a space.
pub fn module_code(summary: &str) -> Option<&str> {
    let (end, _) = summary.char_indices().nth(4)?;
    let (code, rest) = summary.split_at(end);
    rest.starts_with(' ').then_some(code)
}

/// Text after the last `(`, up to the next `)` or the end of the text.
pub fn bracketed_kind(summary: &str) -> Option<&str> {
    let (_, after) = summary.rsplit_once('(')?;
    Some(after.split(')').next().unwrap_or(after))
}

/// Text before the first `,`, or all of it.
pub fn room(location: &str) -> &str {
    location.split(',').next().unwrap_or(location)
}

/// The rest of the first line of `text` that starts with `keyword`.
pub fn keyword_line<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    if keyword.is_empty() {
        return None;
    }
    text.split('\n')
        .find_map(|line| line.strip_prefix(keyword))
}
