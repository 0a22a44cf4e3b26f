use std::fmt;

use super::{BoundedText, CalendarTime};

pub const SUMMARY_CAPACITY: usize = 128;
pub const LOCATION_CAPACITY: usize = 128;
pub const DESCRIPTION_CAPACITY: usize = 512;
pub const MODULE_CAPACITY: usize = 16;
pub const KIND_CAPACITY: usize = 32;
pub const ROOM_CAPACITY: usize = 64;
pub const STAFF_CAPACITY: usize = 128;

/// A single `VEVENT` as seen by the event reader.
///
/// `module`, `kind`, `room` and `staff` are only filled when extended parsing is enabled in
/// [`crate::parser::ParserOptions`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CalendarEvent {
    pub summary: BoundedText<SUMMARY_CAPACITY>,
    pub location: BoundedText<LOCATION_CAPACITY>,
    pub description: BoundedText<DESCRIPTION_CAPACITY>,
    pub start: CalendarTime,
    pub end: CalendarTime,
    /// Module code: the first four characters of the summary when followed by a space.
    pub module: BoundedText<MODULE_CAPACITY>,
    /// Session type: the text inside the last parenthesis of the summary.
    pub kind: BoundedText<KIND_CAPACITY>,
    /// The location up to the first comma.
    pub room: BoundedText<ROOM_CAPACITY>,
    pub staff: BoundedText<STAFF_CAPACITY>,
}

impl CalendarEvent {
    /// Reset every field to its empty state, keeping allocations.
    pub fn clear(&mut self) {
        self.summary.clear();
        self.location.clear();
        self.description.clear();
        self.start = CalendarTime::default();
        self.end = CalendarTime::default();
        self.module.clear();
        self.kind.clear();
        self.room.clear();
        self.staff.clear();
    }

    #[inline]
    pub fn start_stamp(&self) -> u64 {
        self.start.stamp()
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}: {}", self.start, self.end, self.summary)?;
        if !self.location.is_empty() {
            write!(f, " @ {}", self.location)?;
        }
        Ok(())
    }
}
