//! Pull `VEVENT`s out of an iCalendar byte stream, one at a time.
//!
//! The parser keeps a cursor into its byte source. Each call to [`IcsParser::next_event`]
//! continues where the previous call stopped, skipping calendar-level properties and events
//! rejected by the caller's filter, until an accepted event is complete or the stream is
//! exhausted. [`IcsParser::restart`] rewinds to the top-level `BEGIN:VCALENDAR` for a new pass.
//!
//! # Examples
//!
//! ```rust
//! use icsfeed::parser::{IcsParser, starts_from};
//! use icsfeed::types::{CalendarEvent, calendar_stamp};
//!
//! let input = b"BEGIN:VCALENDAR\r\n\
//!     BEGIN:VEVENT\r\nSUMMARY:Old\r\nDTSTART:20200101T090000\r\nEND:VEVENT\r\n\
//!     BEGIN:VEVENT\r\nSUMMARY:New\r\nDTSTART:20300101T090000\r\nEND:VEVENT\r\n\
//!     END:VCALENDAR\r\n";
//!
//! let mut parser = IcsParser::from_slice(input);
//! parser.restart().unwrap();
//!
//! let mut event = CalendarEvent::default();
//! let now = calendar_stamp(2025, 1, 1, 0, 0);
//! assert!(parser.next_event(&mut event, starts_from(now)).unwrap());
//! assert_eq!(event.summary.as_str(), "New");
//! assert!(!parser.next_event(&mut event, starts_from(now)).unwrap());
//! ```

use tracing::{debug, trace, warn};

use super::{EventAssembler, Field, FieldOutcome, LineBuffer, LineReader, ParserError, ParserOptions};
use crate::source::{ByteSource, MemorySource};
use crate::types::CalendarEvent;

const BEGIN_CALENDAR: &str = "BEGIN:VCALENDAR";
const BEGIN_EVENT: &str = "BEGIN:VEVENT";
const END_EVENT: &str = "END:VEVENT";
const BEGIN: &str = "BEGIN";
const END: &str = "END";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekingEvent,
    /// `depth` counts open sub-components (e.g. `VALARM`) inside the event.
    InEvent { depth: usize },
}

/// Counters since the last restart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Logical lines read.
    pub lines: usize,
    /// Logical lines that did not fit the decode buffer.
    pub truncated_lines: usize,
    /// Recognized fields cut to fit their slot in the event.
    pub truncated_fields: usize,
    /// `DTSTART`/`DTEND` values that failed to decode.
    pub malformed_times: usize,
    pub accepted_events: usize,
    pub rejected_events: usize,
    /// Events cut off by the end of the stream before their `END:VEVENT`.
    pub unterminated_events: usize,
}

/// Filter accepting every event.
#[inline]
pub fn accept_all(_event: &CalendarEvent) -> bool {
    true
}

/// Filter accepting events starting at or after `stamp` (see [`crate::types::calendar_stamp`]).
pub fn starts_from(stamp: u64) -> impl Fn(&CalendarEvent) -> bool + Clone {
    move |event: &CalendarEvent| event.start_stamp() >= stamp
}

/// Streaming `VEVENT` reader over a `ByteSource`.
///
/// The parser is stateful and not meant to be shared without a lock held for a whole
/// enumeration pass, see [`crate::agenda::SharedFeed`].
#[derive(Debug)]
pub struct IcsParser<S: ByteSource> {
    reader: LineReader<S>,
    buffer: LineBuffer,
    options: ParserOptions,
    stats: ParseStats,
    needs_restart: bool,
}

impl<'a> IcsParser<MemorySource<&'a [u8]>> {
    pub fn from_slice(slice: &'a [u8]) -> Self {
        Self::new(MemorySource::from_slice(slice))
    }
}

impl<S: ByteSource> IcsParser<S> {
    pub fn new(source: S) -> Self {
        let options = ParserOptions::default();
        Self {
            reader: LineReader::new(source),
            buffer: LineBuffer::with_capacity(options.line_capacity),
            options,
            stats: ParseStats::default(),
            needs_restart: false,
        }
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.buffer = LineBuffer::with_capacity(options.line_capacity);
        self.options = options;
        self
    }

    #[inline]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    #[inline]
    pub fn stats(&self) -> ParseStats {
        self.stats
    }

    #[inline]
    pub fn source(&self) -> &S {
        self.reader.source()
    }

    pub fn into_source(self) -> S {
        self.reader.into_source()
    }

    /// Install a new byte source and hand back the previous one.
    ///
    /// The next enumeration call restarts on the new source first.
    pub fn set_source(&mut self, source: S) -> S {
        debug!("byte source replaced, restart pending");
        self.needs_restart = true;
        self.reader.replace_source(source)
    }

    /// Rewind to the start and skip to the line after `BEGIN:VCALENDAR`.
    ///
    /// A stream without `BEGIN:VCALENDAR` is consumed entirely, which is not an error.
    pub fn restart(&mut self) -> Result<(), ParserError> {
        self.reader.rewind()?;
        self.stats = ParseStats::default();
        self.needs_restart = false;
        while self.read_line()? {
            if self.line_is(BEGIN_CALENDAR) {
                debug!(line = self.buffer.number(), "calendar found");
                return Ok(());
            }
        }
        debug!("no calendar in stream");
        Ok(())
    }

    /// Populate `event` with the next event accepted by `filter`.
    ///
    /// Returns `Ok(false)` once the stream holds no further accepted event. An event cut off
    /// by the end of the stream is never handed to `filter` and counts as not found.
    pub fn next_event<F>(&mut self, event: &mut CalendarEvent, mut filter: F) -> Result<bool, ParserError>
    where
        F: FnMut(&CalendarEvent) -> bool,
    {
        if self.needs_restart {
            self.restart()?;
        }
        event.clear();
        let mut state = ScanState::SeekingEvent;

        while self.read_line()? {
            match state {
                ScanState::SeekingEvent => {
                    if self.line_is(BEGIN_EVENT) {
                        event.clear();
                        state = ScanState::InEvent { depth: 0 };
                    }
                }
                ScanState::InEvent { .. } if self.line_is(END_EVENT) => {
                    if filter(&*event) {
                        self.stats.accepted_events += 1;
                        return Ok(true);
                    }
                    self.stats.rejected_events += 1;
                    debug!(line = self.buffer.number(), summary = %event.summary, "event rejected");
                    state = ScanState::SeekingEvent;
                }
                ScanState::InEvent { depth: 0 } if self.line_is(BEGIN_EVENT) => {
                    warn!(
                        line = self.buffer.number(),
                        "BEGIN:VEVENT inside an event, discarding the unterminated one"
                    );
                    event.clear();
                }
                ScanState::InEvent { depth } => {
                    state = ScanState::InEvent {
                        depth: self.apply_line(event, depth),
                    };
                }
            }
        }

        if matches!(state, ScanState::InEvent { .. }) {
            self.stats.unterminated_events += 1;
            warn!(line = self.reader.line_number(), "stream ended inside a VEVENT block");
        }
        event.clear();
        Ok(false)
    }

    /// [`Self::next_event`] with [`accept_all`].
    pub fn next_any(&mut self, event: &mut CalendarEvent) -> Result<bool, ParserError> {
        self.next_event(event, accept_all)
    }

    /// Iterate over the remaining events accepted by `filter`.
    pub fn events<F>(&mut self, filter: F) -> Events<'_, S, F>
    where
        F: FnMut(&CalendarEvent) -> bool,
    {
        Events {
            parser: self,
            filter,
            done: false,
        }
    }

    fn read_line(&mut self) -> Result<bool, ParserError> {
        if !self.reader.read_into(&mut self.buffer)? {
            return Ok(false);
        }
        self.stats.lines += 1;
        if self.buffer.is_truncated() {
            self.stats.truncated_lines += 1;
            warn!(
                line = self.buffer.number(),
                capacity = self.buffer.capacity(),
                dropped = self.buffer.dropped(),
                "content line truncated"
            );
        }
        trace!(line = self.buffer.number(), content = %self.buffer.as_str());
        Ok(true)
    }

    #[inline]
    fn line_is(&self, marker: &str) -> bool {
        self.buffer.as_bytes().eq_ignore_ascii_case(marker.as_bytes())
    }

    /// Apply the current line to `event`, returning the new sub-component depth.
    fn apply_line(&mut self, event: &mut CalendarEvent, depth: usize) -> usize {
        let line = self.buffer.as_str();
        let Some(field) = Field::split(&line) else {
            return depth;
        };
        if field.is(BEGIN) {
            return depth + 1;
        }
        if field.is(END) {
            return depth.saturating_sub(1);
        }
        if depth > 0 {
            return depth;
        }

        match EventAssembler::new(&self.options).apply(event, &field) {
            FieldOutcome::Ignored | FieldOutcome::Stored(_) => {}
            FieldOutcome::Truncated(property) => {
                self.stats.truncated_fields += 1;
                debug!(
                    line = self.buffer.number(),
                    property = property.name(),
                    "value truncated"
                );
            }
            FieldOutcome::MalformedTime(property, err) => {
                self.stats.malformed_times += 1;
                warn!(
                    line = self.buffer.number(),
                    property = property.name(),
                    value = field.value,
                    "invalid date-time: {err}"
                );
            }
        }
        depth
    }
}

/// Iterator returned by [`IcsParser::events`].
pub struct Events<'p, S: ByteSource, F> {
    parser: &'p mut IcsParser<S>,
    filter: F,
    done: bool,
}

impl<S: ByteSource, F> Iterator for Events<'_, S, F>
where
    F: FnMut(&CalendarEvent) -> bool,
{
    type Item = Result<CalendarEvent, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut event = CalendarEvent::default();
        match self.parser.next_event(&mut event, &mut self.filter) {
            Ok(true) => Some(Ok(event)),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
