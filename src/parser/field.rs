//! Split a decoded logical line into its parts.
//!
//! A content line has the shape `NAME[;PARAMS]:VALUE`:
//! - the value is everything after the first `:`,
//! - the name is everything before the first `;` of the remaining head,
//! - the raw parameter string, if any, is what follows that `;`.
//!
//! Parameters are not parsed any further here; consumers look for what they need (e.g. `TZID`).
//! Lines without `:` are not fields.

use std::fmt;

use crate::{PARAM_DELIMITER, VALUE_DELIMITER};

/// Borrowed view of one content line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Field<'a> {
    pub name: &'a str,
    pub params: Option<&'a str>,
    pub value: &'a str,
}

impl<'a> Field<'a> {
    /// Split `line`, returning `None` if it has no value delimiter.
    pub fn split(line: &'a str) -> Option<Self> {
        let (head, value) = line.split_once(VALUE_DELIMITER)?;
        let (name, params) = match head.split_once(PARAM_DELIMITER) {
            Some((name, params)) => (name, Some(params)),
            None => (head, None),
        };
        Some(Self {
            name,
            params,
            value,
        })
    }

    /// Whether the field name equals `name`, ignoring ASCII case.
    #[inline]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "name: {}\nparams: {:?}\nvalue: {:?}",
            self.name, self.params, self.value
        )
    }
}
