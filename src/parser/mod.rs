use std::borrow::Cow;

mod error;
pub use error::ParserError;

mod escape;
pub use escape::{EscapeDecoder, unescape};

mod line;
pub use line::{LineBuffer, LineReader};

mod field;
pub use field::Field;

pub mod details;

mod event;
pub use event::{EventAssembler, FieldOutcome, Property};

mod ics;
pub use ics::{Events, IcsParser, ParseStats, accept_all, starts_from};

pub const DEFAULT_LINE_CAPACITY: usize = 1024;
pub const DEFAULT_STAFF_KEYWORD: &str = "Staff member(s): ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Capacity of the logical line decode buffer. Longer lines are truncated.
    pub line_capacity: usize,
    /// Store `DESCRIPTION` values.
    pub description: bool,
    /// Derive module, type, room and staff sub-fields from timetable-style events.
    pub extended_info: bool,
    /// Line prefix in the description that introduces the staff list.
    pub staff_keyword: Cow<'static, str>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            line_capacity: DEFAULT_LINE_CAPACITY,
            description: true,
            extended_info: false,
            staff_keyword: Cow::Borrowed(DEFAULT_STAFF_KEYWORD),
        }
    }
}
