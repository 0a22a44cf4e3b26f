use derive_more::{Deref, Display};

/// Text with a fixed byte capacity.
///
/// Writes copy at most `N` bytes. Longer input is cut at the last UTF-8 character boundary that
/// fits, so the stored value never exceeds `N` bytes and is always valid text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, Display)]
pub struct BoundedText<const N: usize>(String);

impl<const N: usize> BoundedText<N> {
    pub const CAPACITY: usize = N;

    pub const fn new() -> Self {
        Self(String::new())
    }

    /// Build from `value`, truncating to capacity.
    pub fn truncated(value: &str) -> Self {
        let mut text = Self::new();
        text.set(value);
        text
    }

    /// Overwrite the content with `value`.
    ///
    /// Returns `true` if `value` had to be truncated.
    pub fn set(&mut self, value: &str) -> bool {
        let fitting = truncate_str(value, N);
        self.0.clear();
        self.0.push_str(fitting);
        fitting.len() < value.len()
    }

    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl<const N: usize> AsRef<str> for BoundedText<N> {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<const N: usize> PartialEq<str> for BoundedText<N> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl<const N: usize> PartialEq<&str> for BoundedText<N> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Longest prefix of `value` that is at most `max` bytes and ends on a character boundary.
pub fn truncate_str(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let end = (0..=max)
        .rev()
        .find(|&idx| value.is_char_boundary(idx))
        .unwrap_or(0);
    &value[..end]
}
