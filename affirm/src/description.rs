use std::{fmt, time::Duration};

use crate::Matcher;

/// Append-only text buffer that matchers write their descriptions into.
///
/// Values are rendered in a few conventional shapes so failure messages read
/// consistently across matchers:
///
/// | Method | Input | Output |
/// |--------|-------|--------|
/// | [`append_text`](Self::append_text) | `runs in ` | `runs in ` |
/// | [`append_value`](Self::append_value) | `20` | `<20>` |
/// | [`append_quoted`](Self::append_quoted) | `abc` | `"abc"` |
///
/// # Example
///
/// ```rust
/// use affirm::Description;
///
/// let mut desc = Description::new();
/// desc.append_text("runs in ").append_value(&4).append_text(" threads");
/// assert_eq!(desc.as_str(), "runs in <4> threads");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Description {
    text: String,
}

impl Description {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends literal text.
    pub fn append_text(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.text.push_str(text.as_ref());
        self
    }

    /// Appends a value in angle brackets, using its `Debug` form.
    pub fn append_value<V: fmt::Debug + ?Sized>(&mut self, value: &V) -> &mut Self {
        self.text.push_str(&format!("<{value:?}>"));
        self
    }

    /// Appends text wrapped in double quotes, with escapes.
    pub fn append_quoted(&mut self, text: &str) -> &mut Self {
        self.text.push_str(&format!("{text:?}"));
        self
    }

    /// Appends the expectation of another matcher.
    pub fn append_description_of<T, M>(&mut self, matcher: &M) -> &mut Self
    where
        T: ?Sized,
        M: Matcher<T> + ?Sized,
    {
        matcher.describe_to(self);
        self
    }

    /// Appends a duration as milliseconds in angle brackets.
    ///
    /// Whole milliseconds render as an integer (`<250>`), anything finer as
    /// a fraction (`<0.9>`).
    pub fn append_millis(&mut self, duration: Duration) -> &mut Self {
        self.append_value(&Millis(duration))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A duration rendered in milliseconds without dropping sub-millisecond parts.
#[derive(Clone, Copy)]
pub(crate) struct Millis(pub(crate) Duration);

impl Millis {
    pub(crate) fn of(duration: &Duration) -> Self {
        Self(*duration)
    }
}

impl fmt::Display for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.subsec_nanos() % 1_000_000 == 0 {
            write!(f, "{}", self.0.as_millis())
        } else {
            write!(f, "{}", self.0.as_nanos() as f64 / 1_000_000.0)
        }
    }
}

impl fmt::Debug for Millis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<Description> for String {
    fn from(desc: Description) -> Self {
        desc.text
    }
}
