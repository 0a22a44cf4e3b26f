use icsfeed::{CalendarEvent, IcsParser};

const SCENARIO: &str = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:Team Sync\nDTSTART;TZID=Europe/London:20240115T093000\nDTEND:20240115T100000\nEND:VEVENT\nEND:VCALENDAR\n";

// Build a calendar around the given VEVENT bodies
pub fn calendar(events: &[&str]) -> String {
    let mut out = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n");
    for body in events {
        out += "BEGIN:VEVENT\r\n";
        out += body;
        out += "END:VEVENT\r\n";
    }
    out + "END:VCALENDAR\r\n"
}

pub fn collect_summaries<S: icsfeed::ByteSource>(
    parser: &mut IcsParser<S>,
    filter: impl FnMut(&CalendarEvent) -> bool,
) -> Vec<String> {
    parser
        .events(filter)
        .map(|event| event.unwrap().summary.into_string())
        .collect()
}

pub mod scenario {
    use crate::{SCENARIO, calendar, collect_summaries};
    use icsfeed::parser::accept_all;
    use icsfeed::{CalendarEvent, CalendarTime, IcsParser};

    #[test]
    fn team_sync() {
        let mut parser = IcsParser::from_slice(SCENARIO.as_bytes());
        parser.restart().unwrap();
        let mut event = CalendarEvent::default();
        assert!(parser.next_event(&mut event, accept_all).unwrap());

        assert_eq!(event.summary, "Team Sync");
        let CalendarTime {
            year,
            month,
            day,
            hour,
            min,
            timezone,
        } = &event.start;
        assert_eq!((*year, *month, *day, *hour, *min), (2024, 1, 15, 9, 30));
        assert_eq!(timezone, "Europe/London");
        assert_eq!(
            (event.end.year, event.end.month, event.end.day, event.end.hour, event.end.min),
            (2024, 1, 15, 10, 0)
        );
        assert_eq!(event.end.timezone, "UTC");
        insta::assert_snapshot!(event, @"2024-01-15 09:30 Europe/London - 2024-01-15 10:00 UTC: Team Sync");
    }

    #[test]
    fn rejected_event_is_skipped() {
        let input = calendar(&["SUMMARY:First\r\n", "SUMMARY:Second\r\n"]);
        let mut parser = IcsParser::from_slice(input.as_bytes());
        parser.restart().unwrap();
        let mut event = CalendarEvent::default();
        assert!(
            parser
                .next_event(&mut event, |event: &CalendarEvent| event.summary != "First")
                .unwrap()
        );
        assert_eq!(event.summary, "Second");
    }

    #[test]
    fn no_calendar_container() {
        let input = b"BEGIN:VEVENT\nSUMMARY:Orphan\nEND:VEVENT\n";
        let mut parser = IcsParser::from_slice(input);
        parser.restart().unwrap();
        let mut event = CalendarEvent::default();
        assert!(!parser.next_event(&mut event, accept_all).unwrap());
    }

    #[test]
    fn restart_is_idempotent() {
        let input = calendar(&["SUMMARY:A\r\n", "SUMMARY:B\r\n", "SUMMARY:C\r\n"]);
        let mut parser = IcsParser::from_slice(input.as_bytes());
        parser.restart().unwrap();
        let first = collect_summaries(&mut parser, accept_all);
        parser.restart().unwrap();
        parser.restart().unwrap();
        let second = collect_summaries(&mut parser, accept_all);
        assert_eq!(first, vec!["A", "B", "C"]);
        similar_asserts::assert_eq!(first, second);
    }

    #[test]
    fn cut_off_event_is_not_found() {
        let input = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:Team Sync\nDTSTART:20240115T093000\n";
        let mut parser = IcsParser::from_slice(input.as_bytes());
        parser.restart().unwrap();
        let mut event = CalendarEvent::default();
        assert!(!parser.next_event(&mut event, accept_all).unwrap());
        assert_eq!(event, CalendarEvent::default());
        assert_eq!(parser.stats().unterminated_events, 1);
        assert!(collect_summaries(&mut parser, accept_all).is_empty());
    }

    #[test]
    fn block_without_recognized_fields() {
        let input = calendar(&["UID:1\r\n"]);
        let mut parser = IcsParser::from_slice(input.as_bytes());
        parser.restart().unwrap();
        let mut seen = 0;
        let mut event = CalendarEvent::default();
        assert!(
            parser
                .next_event(&mut event, |_: &CalendarEvent| {
                    seen += 1;
                    true
                })
                .unwrap()
        );
        assert_eq!(seen, 1);
        assert_eq!(event, CalendarEvent::default());
    }
}

pub mod filter {
    use crate::{calendar, collect_summaries};
    use icsfeed::IcsParser;
    use icsfeed::parser::starts_from;
    use icsfeed::types::calendar_stamp;

    #[test]
    fn stamps_at_or_after() {
        let input = calendar(&[
            "SUMMARY:S1\r\nDTSTART:20240115T090000\r\n",
            "SUMMARY:S2\r\nDTSTART:20240115T093000\r\n",
            "SUMMARY:S3\r\nDTSTART:20240201T080000\r\n",
        ]);
        let mut parser = IcsParser::from_slice(input.as_bytes());
        parser.restart().unwrap();
        let summaries = collect_summaries(&mut parser, starts_from(calendar_stamp(2024, 1, 15, 9, 30)));
        assert_eq!(summaries, vec!["S2", "S3"]);
    }

    #[test]
    fn enumeration_continues_between_calls() {
        let input = calendar(&[
            "SUMMARY:S1\r\nDTSTART:20240115T090000\r\n",
            "SUMMARY:S2\r\nDTSTART:20240115T093000\r\n",
        ]);
        let mut parser = IcsParser::from_slice(input.as_bytes());
        parser.restart().unwrap();
        let mut event = icsfeed::CalendarEvent::default();
        assert!(parser.next_any(&mut event).unwrap());
        assert_eq!(event.summary, "S1");
        assert!(parser.next_any(&mut event).unwrap());
        assert_eq!(event.summary, "S2");
        assert!(!parser.next_any(&mut event).unwrap());
    }
}

pub mod text {
    use crate::calendar;
    use icsfeed::parser::{ParserOptions, accept_all};
    use icsfeed::types::{DESCRIPTION_CAPACITY, LOCATION_CAPACITY, SUMMARY_CAPACITY};
    use icsfeed::{CalendarEvent, IcsParser};
    use rstest::rstest;

    fn first_event(input: &str, options: ParserOptions) -> CalendarEvent {
        let mut parser = IcsParser::from_slice(input.as_bytes()).with_options(options);
        parser.restart().unwrap();
        let mut event = CalendarEvent::default();
        assert!(parser.next_event(&mut event, accept_all).unwrap());
        event
    }

    #[rstest]
    #[case(r"a\nb", "a\nb")]
    #[case(r"a\tb", "a\tb")]
    #[case(r"a\\b", "a\\b")]
    #[case(r"a\,b\;c", "a,b;c")]
    #[case(r"one\ntwo\tthree\\four", "one\ntwo\tthree\\four")]
    fn escapes(#[case] raw: &str, #[case] expected: &str) {
        let input = calendar(&[format!("DESCRIPTION:{raw}\r\n").as_str()]);
        let event = first_event(&input, ParserOptions::default());
        assert_eq!(event.description, expected);
    }

    #[rstest]
    #[case("SUMMARY:Weekly plan\r\n ning meeting\r\n", "Weekly planning meeting")]
    #[case("SUMMARY:Weekly plan\n\tning meeting\n", "Weekly planning meeting")]
    #[case("SUMMARY:Weekly\r\n  planning\r\n", "Weekly planning")]
    fn unfolding(#[case] body: &str, #[case] expected: &str) {
        let event = first_event(&calendar(&[body]), ParserOptions::default());
        assert_eq!(event.summary, expected);
    }

    #[test]
    fn truncation_does_not_spill() {
        let summary = "s".repeat(SUMMARY_CAPACITY * 2);
        let location = "l".repeat(LOCATION_CAPACITY + 1);
        let description = "d".repeat(DESCRIPTION_CAPACITY + 100);
        let body = format!("SUMMARY:{summary}\r\nLOCATION:{location}\r\nDESCRIPTION:{description}\r\n");
        let event = first_event(&calendar(&[body.as_str()]), ParserOptions::default());

        assert_eq!(event.summary.as_str(), &summary[..SUMMARY_CAPACITY]);
        assert_eq!(event.location.as_str(), &location[..LOCATION_CAPACITY]);
        assert_eq!(event.description.as_str(), &description[..DESCRIPTION_CAPACITY]);
    }

    #[test]
    fn line_truncation_keeps_following_lines() {
        let options = ParserOptions {
            line_capacity: 32,
            ..Default::default()
        };
        let long = "x".repeat(100);
        let body = format!("SUMMARY:{long}\r\nLOCATION:Room 1\r\n");
        let event = first_event(&calendar(&[body.as_str()]), options);
        assert_eq!(event.summary.len(), 32 - "SUMMARY:".len());
        assert_eq!(event.location, "Room 1");
    }

    #[test]
    fn utf8_is_kept_whole() {
        let summary = "ü".repeat(SUMMARY_CAPACITY);
        let event = first_event(
            &calendar(&[format!("SUMMARY:{summary}\r\n").as_str()]),
            ParserOptions::default(),
        );
        assert_eq!(event.summary.len(), SUMMARY_CAPACITY);
        assert!(event.summary.chars().all(|c| c == 'ü'));
    }
}

pub mod timetable {
    use icsfeed::parser::{ParserOptions, accept_all};
    use icsfeed::{ByteSource, CalendarEvent, FileSource, IcsParser, MemorySource};

    const INPUT: &str = include_str!("./resources/timetable.ics");

    fn extended() -> ParserOptions {
        ParserOptions {
            extended_info: true,
            ..Default::default()
        }
    }

    fn all_events<S: ByteSource>(parser: &mut IcsParser<S>) -> Vec<CalendarEvent> {
        parser.restart().unwrap();
        parser
            .events(accept_all)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn extended_fields() {
        let mut parser = IcsParser::from_slice(INPUT.as_bytes()).with_options(extended());
        let events = all_events(&mut parser);
        assert_eq!(events.len(), 3);

        let first = &events[0];
        assert_eq!(
            first.summary,
            "DOSA Drop-in Session (optional) - COM00023H-A (Practical)"
        );
        assert_eq!(first.module, "DOSA");
        assert_eq!(first.kind, "Practical");
        assert_eq!(first.location, "CSE/082, Computer Science Building");
        assert_eq!(first.room, "CSE/082");
        assert_eq!(first.staff, "Kaul, Chaitanya, Manandhar, Suresh (Dr)");
        assert_eq!(
            first.description,
            "Module: COM00023H-A\nStaff member(s): Kaul, Chaitanya, Manandhar, Suresh (Dr)\nWeek 3"
        );
        assert_eq!((first.end.hour, first.end.min), (11, 0));

        let second = &events[1];
        assert_eq!(second.module, "FUML");
        assert_eq!(second.kind, "Seminar");
        assert_eq!(second.room, "LMB/030");
        assert_eq!(second.staff, "Manandhar, Suresh (Dr)");

        let third = &events[2];
        assert!(third.module.is_empty());
        assert!(third.kind.is_empty());
        assert!(third.staff.is_empty());
        assert_eq!(third.room, "Central Hall");
        assert_eq!(
            third.description,
            "Bring a CV.\tBooths open all day\\afternoon talks"
        );
        insta::assert_snapshot!(third, @"2024-01-17 10:00 UTC - 2024-01-17 16:00 UTC: Careers fair @ Central Hall");
    }

    #[test]
    fn file_and_memory_agree() {
        let mut memory = IcsParser::new(MemorySource::new(INPUT.as_bytes().to_vec()))
            .with_options(extended());
        let mut file = IcsParser::new(FileSource::open("./tests/resources/timetable.ics").unwrap())
            .with_options(extended());
        similar_asserts::assert_eq!(all_events(&mut memory), all_events(&mut file));
        // Second pass over the rewound file
        similar_asserts::assert_eq!(all_events(&mut memory), all_events(&mut file));
    }

    #[test]
    fn restart_skips_calendar_properties() {
        let mut parser = IcsParser::from_slice(INPUT.as_bytes());
        parser.restart().unwrap();
        assert_eq!(parser.stats().lines, 1);
        let mut event = CalendarEvent::default();
        assert!(parser.next_any(&mut event).unwrap());
        assert_eq!(parser.stats().accepted_events, 1);
    }
}
