//! Print the upcoming events of a local `.ics` file, grouped by day.
//!
//! ```sh
//! RUST_LOG=icsfeed=debug cargo run --example upcoming -- tests/resources/timetable.ics 202401150000
//! ```
//!
//! The optional second argument is a `YYYYMMDDHHMM` start; it defaults to now.

use icsfeed::agenda::{DEFAULT_PAGE_SIZE, upcoming};
use icsfeed::parser::{IcsParser, ParserOptions};
use icsfeed::source::FileSource;
use icsfeed::types::CalendarTime;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .unwrap_or_else(|| "./tests/resources/timetable.ics".to_owned());
    let from = match args.next() {
        Some(arg) => arg.parse::<u64>().expect("start must be YYYYMMDDHHMM"),
        None => CalendarTime::now_local().stamp(),
    };

    let source = FileSource::open(&path).unwrap();
    let mut parser = IcsParser::new(source).with_options(ParserOptions {
        extended_info: true,
        ..Default::default()
    });

    let days = upcoming(&mut parser, from, DEFAULT_PAGE_SIZE).unwrap();
    if days.is_empty() {
        println!("No upcoming events in {path}");
    }
    for day in days {
        println!("{}", day.label());
        for event in day.events {
            println!(
                "  {:02}:{:02}-{:02}:{:02}  {}",
                event.start.hour, event.start.min, event.end.hour, event.end.min, event.summary
            );
            if !event.room.is_empty() {
                println!("               {} {}", event.room, event.kind);
            }
            if !event.staff.is_empty() {
                println!("               {}", event.staff);
            }
        }
    }
    println!("{:?}", parser.stats());
}
