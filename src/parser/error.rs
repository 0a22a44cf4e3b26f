use crate::source::SourceError;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParserError {
    #[error(transparent)]
    Source(#[from] SourceError),
}
