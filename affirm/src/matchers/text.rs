use regex::Regex;

use crate::{Description, Matcher, Result};

fn describe_text(actual: &str, desc: &mut Description) {
    desc.append_text("Text is ").append_quoted(actual);
}

macro_rules! text_matcher {
    ($(#[$meta:meta])* $name:ident, $label:literal, |$expected:ident, $actual:ident| $check:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            expected: String,
        }

        impl $name {
            pub fn new(expected: impl Into<String>) -> Self {
                Self {
                    expected: expected.into(),
                }
            }
        }

        impl<T: AsRef<str> + ?Sized> Matcher<T> for $name {
            fn matches(&self, actual: &T) -> bool {
                let $expected = self.expected.as_str();
                let $actual = actual.as_ref();
                $check
            }

            fn describe_to(&self, desc: &mut Description) {
                desc.append_text($label).append_quoted(&self.expected);
            }

            fn describe_mismatch(&self, actual: &T, desc: &mut Description) {
                describe_text(actual.as_ref(), desc);
            }
        }
    };
}

text_matcher!(
    /// Matches text equal to the expected value.
    TextIs, "Text with value ", |expected, actual| actual == expected
);

text_matcher!(
    /// Matches text containing the expected value.
    HasString, "Text with ", |expected, actual| actual.contains(expected)
);

text_matcher!(
    /// Matches text beginning with the expected prefix.
    StartsWith, "Text starting with ", |expected, actual| actual.starts_with(expected)
);

text_matcher!(
    /// Matches text ending with the expected suffix.
    EndsWith, "Text ending with ", |expected, actual| actual.ends_with(expected)
);

/// Matches text that the pattern matches anywhere.
///
/// Anchor the pattern with `^` and `$` to require a full match.
#[derive(Debug, Clone)]
pub struct MatchesRegex {
    pattern: Regex,
}

impl MatchesRegex {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Regex`](crate::Error::Regex) if the pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl<T: AsRef<str> + ?Sized> Matcher<T> for MatchesRegex {
    fn matches(&self, actual: &T) -> bool {
        self.pattern.is_match(actual.as_ref())
    }

    fn describe_to(&self, desc: &mut Description) {
        desc.append_text("Text matches ")
            .append_quoted(self.pattern.as_str());
    }

    fn describe_mismatch(&self, actual: &T, desc: &mut Description) {
        describe_text(actual.as_ref(), desc);
    }
}
