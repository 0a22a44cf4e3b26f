//! Upcoming events grouped by day, and a parser shared between a fetcher and its readers.
//!
//! A fetcher downloads a calendar into memory and [`SharedFeed::publish`]es it as one
//! `Arc<[u8]>`. Readers call [`SharedFeed::upcoming`], which holds the lock for the whole
//! enumeration pass, so they never observe a half-swapped source or interleave with another pass.

use itertools::Itertools;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::parser::{IcsParser, ParserError, ParserOptions, starts_from};
use crate::source::{ByteSource, MemorySource};
use crate::types::{CalendarEvent, CalendarTime};

/// Events listed per page by default.
pub const DEFAULT_PAGE_SIZE: usize = 7;

/// Events starting on the same calendar day, in stream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaDay {
    /// Start of the first event of the day.
    pub date: CalendarTime,
    pub events: Vec<CalendarEvent>,
}

impl AgendaDay {
    /// `DD/MM/YYYY`
    pub fn label(&self) -> String {
        self.date.date_label()
    }
}

/// Restart `parser` and collect up to `limit` events starting at or after `from`.
///
/// A new day starts whenever an event's start date differs from the previous event's.
pub fn upcoming<S: ByteSource>(
    parser: &mut IcsParser<S>,
    from: u64,
    limit: usize,
) -> Result<Vec<AgendaDay>, ParserError> {
    parser.restart()?;
    let events = parser
        .events(starts_from(from))
        .take(limit)
        .collect::<Result<Vec<_>, _>>()?;

    let chunks = events
        .into_iter()
        .chunk_by(|event| (event.start.year, event.start.month, event.start.day));
    let days = chunks
        .into_iter()
        .map(|(_, events)| events.collect::<Vec<_>>())
        .filter_map(|events| {
            Some(AgendaDay {
                date: events.first()?.start.clone(),
                events,
            })
        })
        .collect();
    Ok(days)
}

pub type FeedBuffer = Arc<[u8]>;
type FeedParser = IcsParser<MemorySource<FeedBuffer>>;

/// Lock-guarded parser over the most recently published calendar buffer.
#[derive(Debug, Clone)]
pub struct SharedFeed {
    parser: Arc<Mutex<FeedParser>>,
}

impl Default for SharedFeed {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

impl SharedFeed {
    /// An empty feed. Until something is published, every pass finds no events.
    pub fn new(options: ParserOptions) -> Self {
        let source = MemorySource::new(FeedBuffer::from(Vec::<u8>::new()));
        Self {
            parser: Arc::new(Mutex::new(IcsParser::new(source).with_options(options))),
        }
    }

    /// Swap in a fully downloaded calendar and return the previous buffer.
    pub fn publish(&self, buffer: impl Into<FeedBuffer>) -> FeedBuffer {
        let buffer = buffer.into();
        debug!(bytes = buffer.len(), "publishing calendar buffer");
        self.lock()
            .set_source(MemorySource::new(buffer))
            .into_inner()
    }

    /// See [`upcoming`].
    pub fn upcoming(&self, from: u64, limit: usize) -> Result<Vec<AgendaDay>, ParserError> {
        let mut parser = self.lock();
        upcoming(&mut *parser, from, limit)
    }

    /// Run `f` with exclusive access to the parser.
    pub fn with_parser<T>(&self, f: impl FnOnce(&mut FeedParser) -> T) -> T {
        let mut parser = self.lock();
        f(&mut parser)
    }

    fn lock(&self) -> MutexGuard<'_, FeedParser> {
        // A panicking reader leaves the parser mid-pass, the next pass restarts anyway
        self.parser.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
