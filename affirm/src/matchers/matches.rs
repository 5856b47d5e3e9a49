use std::fmt;

use crate::{Description, Matcher};

/// Matches a matcher that accepts the given arguments.
///
/// Turns a matcher into the value under test, which is how harnesses such as
/// [`RunsInThreads`](crate::RunsInThreads) are themselves tested.
///
/// ```rust
/// use affirm::{Assertion, matchers::{Matches, TextIs}};
///
/// Assertion::value("accepts abc", TextIs::new("abc"), Matches::new("abc"))
///     .affirm()
///     .unwrap();
/// ```
pub struct Matches<X> {
    args: X,
    shown: String,
}

impl<X> fmt::Debug for Matches<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matches")
            .field("args", &self.shown)
            .finish()
    }
}

impl<X: fmt::Debug> Matches<X> {
    pub fn new(args: X) -> Self {
        let shown = format!("{args:?}");
        Self { args, shown }
    }
}

impl<X> Matches<X> {
    /// For arguments without a useful `Debug` form, such as closures.
    pub fn labeled(label: impl Into<String>, args: X) -> Self {
        Self {
            args,
            shown: label.into(),
        }
    }
}

impl<X, M> Matcher<M> for Matches<X>
where
    M: Matcher<X>,
{
    fn matches(&self, actual: &M) -> bool {
        actual.matches(&self.args)
    }

    fn describe_to(&self, desc: &mut Description) {
        desc.append_text(&self.shown);
    }

    fn describe_mismatch(&self, actual: &M, desc: &mut Description) {
        actual.describe_to(desc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::{IsEqual, TextIs};

    #[test]
    fn accepts_matcher_that_matches() {
        let matcher = Matches::new(String::from("abc"));
        assert!(matcher.matches(&TextIs::new("abc")));
        assert!(!matcher.matches(&TextIs::new("xyz")));
        assert_eq!(Matcher::<TextIs>::expectation(&matcher), "\"abc\"");
    }

    #[test]
    fn mismatch_shows_what_the_matcher_expects() {
        let matcher = Matches::labeled("seven", 7);
        assert_eq!(matcher.mismatch(&IsEqual::new(8)), "<8>");
    }
}
