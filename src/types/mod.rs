mod event;
pub use event::*;
mod text;
pub use text::*;
mod time;
pub use time::*;
