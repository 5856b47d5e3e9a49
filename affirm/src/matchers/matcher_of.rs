use std::{fmt, marker::PhantomData};

use crate::{Description, Matcher};

/// A matcher assembled from three closures.
///
/// Useful for one-off checks in tests, where a named type would be noise.
///
/// ```rust
/// use affirm::{Description, Matcher, matchers::MatcherOf};
///
/// let short = MatcherOf::new(
///     |text: &str| text.len() < 5,
///     |desc: &mut Description| {
///         desc.append_text("shorter than five");
///     },
///     |text: &str, desc: &mut Description| {
///         desc.append_text("length was ").append_value(&text.len());
///     },
/// );
/// assert!(short.matches("abc"));
/// assert_eq!(short.mismatch("abcdef"), "length was <6>");
/// ```
pub struct MatcherOf<T: ?Sized, F, D, X> {
    matches: F,
    describe: D,
    mismatch: X,
    _marker: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F, D, X> MatcherOf<T, F, D, X>
where
    F: Fn(&T) -> bool,
    D: Fn(&mut Description),
    X: Fn(&T, &mut Description),
{
    pub fn new(matches: F, describe: D, mismatch: X) -> Self {
        Self {
            matches,
            describe,
            mismatch,
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized, F, D, X> fmt::Debug for MatcherOf<T, F, D, X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatcherOf").finish_non_exhaustive()
    }
}

impl<T: ?Sized, F, D, X> Matcher<T> for MatcherOf<T, F, D, X>
where
    F: Fn(&T) -> bool,
    D: Fn(&mut Description),
    X: Fn(&T, &mut Description),
{
    fn matches(&self, actual: &T) -> bool {
        (self.matches)(actual)
    }

    fn describe_to(&self, desc: &mut Description) {
        (self.describe)(desc)
    }

    fn describe_mismatch(&self, actual: &T, desc: &mut Description) {
        (self.mismatch)(actual, desc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegates_to_closures() {
        let positive = MatcherOf::new(
            |n: &i64| *n > 0,
            |desc: &mut Description| {
                desc.append_text("positive");
            },
            |n: &i64, desc: &mut Description| {
                desc.append_value(n).append_text(" is not positive");
            },
        );
        assert!(positive.matches(&1));
        assert!(!positive.matches(&-1));
        assert_eq!(positive.expectation(), "positive");
        assert_eq!(positive.mismatch(&-1), "<-1> is not positive");
    }
}
