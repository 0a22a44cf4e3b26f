use phf::phf_map;

use super::{Field, ParserOptions, details};
use crate::types::{CalendarEvent, CalendarTime, TimeError};

/// Properties that mutate a `CalendarEvent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Summary,
    Location,
    Description,
    DtStart,
    DtEnd,
}

static PROPERTIES: phf::Map<&'static str, Property> = phf_map! {
    "SUMMARY" => Property::Summary,
    "LOCATION" => Property::Location,
    "DESCRIPTION" => Property::Description,
    "DTSTART" => Property::DtStart,
    "DTEND" => Property::DtEnd,
};

impl Property {
    /// Look up a property by name, ignoring ASCII case.
    pub fn lookup(name: &str) -> Option<Self> {
        if let Some(property) = PROPERTIES.get(name) {
            return Some(*property);
        }
        if name.bytes().any(|byte| byte.is_ascii_lowercase()) {
            return PROPERTIES.get(name.to_ascii_uppercase().as_str()).copied();
        }
        None
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Summary => "SUMMARY",
            Self::Location => "LOCATION",
            Self::Description => "DESCRIPTION",
            Self::DtStart => "DTSTART",
            Self::DtEnd => "DTEND",
        }
    }
}

/// What applying a field to an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOutcome {
    /// Not a recognized property, the event is untouched.
    Ignored,
    Stored(Property),
    /// Stored, but the value or one of its derived sub-fields did not fit.
    Truncated(Property),
    /// A `DTSTART`/`DTEND` value that does not decode. The time is reset to its default.
    MalformedTime(Property, TimeError),
}

/// Populates a `CalendarEvent` from the fields of a `VEVENT` block.
#[derive(Debug, Clone, Copy)]
pub struct EventAssembler<'o> {
    options: &'o ParserOptions,
}

impl<'o> EventAssembler<'o> {
    pub fn new(options: &'o ParserOptions) -> Self {
        Self { options }
    }

    /// Apply one field. Every recognized field fully overwrites its targets.
    pub fn apply(&self, event: &mut CalendarEvent, field: &Field) -> FieldOutcome {
        let Some(property) = Property::lookup(field.name) else {
            return FieldOutcome::Ignored;
        };

        let truncated = match property {
            Property::Summary => self.apply_summary(event, field.value),
            Property::Location => self.apply_location(event, field.value),
            Property::Description if self.options.description => {
                self.apply_description(event, field.value)
            }
            Property::Description => return FieldOutcome::Ignored,
            Property::DtStart | Property::DtEnd => {
                let target = match property {
                    Property::DtStart => &mut event.start,
                    _ => &mut event.end,
                };
                return match CalendarTime::parse(field.value, field.params) {
                    Ok(time) => {
                        *target = time;
                        FieldOutcome::Stored(property)
                    }
                    Err(err) => {
                        *target = CalendarTime::default();
                        FieldOutcome::MalformedTime(property, err)
                    }
                };
            }
        };

        if truncated {
            FieldOutcome::Truncated(property)
        } else {
            FieldOutcome::Stored(property)
        }
    }

    fn apply_summary(&self, event: &mut CalendarEvent, value: &str) -> bool {
        let mut truncated = event.summary.set(value);
        if self.options.extended_info {
            let summary = event.summary.as_str();
            truncated |= event
                .module
                .set(details::module_code(summary).unwrap_or_default());
            truncated |= event
                .kind
                .set(details::bracketed_kind(summary).unwrap_or_default());
        }
        truncated
    }

    fn apply_location(&self, event: &mut CalendarEvent, value: &str) -> bool {
        let mut truncated = event.location.set(value);
        if self.options.extended_info {
            truncated |= event.room.set(details::room(value));
        }
        truncated
    }

    fn apply_description(&self, event: &mut CalendarEvent, value: &str) -> bool {
        let mut truncated = event.description.set(value);
        if self.options.extended_info {
            let staff =
                details::keyword_line(event.description.as_str(), &self.options.staff_keyword);
            truncated |= event.staff.set(staff.unwrap_or_default());
        }
        truncated
    }
}
