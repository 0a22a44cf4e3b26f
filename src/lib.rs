const VALUE_DELIMITER: char = ':';
const PARAM_DELIMITER: char = ';';

pub mod source;
pub use source::{ByteSource, FileSource, MemorySource, SourceError};

pub mod parser;
pub use parser::{IcsParser, ParserError, ParserOptions};

pub mod types;
pub use types::{CalendarEvent, CalendarTime};

pub mod agenda;
