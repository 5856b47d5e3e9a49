use std::fmt;

use crate::{Description, Matcher, Verdict};

/// Matches when every one of its matchers does.
///
/// An empty `AllOf` matches anything. On failure only the first rejecting
/// matcher is reported, and its [`Verdict`] is passed on, so a missed
/// deadline inside the conjunction still surfaces as a timeout.
pub struct AllOf<'a, T: ?Sized> {
    matchers: Vec<Box<dyn Matcher<T> + 'a>>,
}

impl<T: ?Sized> fmt::Debug for AllOf<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllOf")
            .field("matchers", &self.matchers.len())
            .finish()
    }
}

impl<T: ?Sized> Default for AllOf<'_, T> {
    fn default() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }
}

impl<'a, T: ?Sized> AllOf<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds another matcher to the conjunction.
    pub fn and(mut self, matcher: impl Matcher<T> + 'a) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl<T: ?Sized> Matcher<T> for AllOf<'_, T> {
    fn matches(&self, actual: &T) -> bool {
        self.matchers.iter().all(|m| m.matches(actual))
    }

    fn describe_to(&self, desc: &mut Description) {
        desc.append_text("(");
        for (i, matcher) in self.matchers.iter().enumerate() {
            if i > 0 {
                desc.append_text(" and ");
            }
            Matcher::<T>::describe_to(&**matcher, desc);
        }
        desc.append_text(")");
    }

    fn describe_mismatch(&self, actual: &T, desc: &mut Description) {
        self.evaluate(actual, desc);
    }

    fn evaluate(&self, actual: &T, mismatch: &mut Description) -> bool {
        self.verdict(actual, mismatch).is_match()
    }

    fn verdict(&self, actual: &T, mismatch: &mut Description) -> Verdict {
        for matcher in &self.matchers {
            let mut inner = Description::new();
            let verdict = matcher.verdict(actual, &mut inner);
            if !verdict.is_match() {
                Matcher::<T>::describe_to(&**matcher, mismatch);
                mismatch.append_text(" ").append_text(inner.as_str());
                return verdict;
            }
        }
        Verdict::Match
    }
}

#[cfg(test)]
mod tests {
    use std::{thread, time::Duration};

    use super::*;
    use crate::{
        MatchesBefore,
        matchers::{EndsWith, MatcherOf, StartsWith},
    };

    fn framed() -> AllOf<'static, str> {
        AllOf::new()
            .and(StartsWith::new("a"))
            .and(EndsWith::new("z"))
    }

    #[test]
    fn requires_every_matcher() {
        let matcher = framed();
        assert_eq!(matcher.len(), 2);
        assert!(matcher.matches("abcz"));
        assert!(!matcher.matches("abc"));
        assert!(!matcher.matches("bcz"));
    }

    #[test]
    fn describes_conjunction() {
        assert_eq!(
            framed().expectation(),
            "(Text starting with \"a\" and Text ending with \"z\")"
        );
    }

    #[test]
    fn reports_first_failing_matcher() {
        assert_eq!(
            framed().mismatch("xyz"),
            "Text starting with \"a\" Text is \"xyz\""
        );
    }

    #[test]
    fn passes_on_inner_timeout() {
        let slow = MatcherOf::new(
            |_: &String| {
                thread::sleep(Duration::from_millis(300));
                true
            },
            |desc: &mut Description| {
                desc.append_text("slow");
            },
            |_: &String, _: &mut Description| {},
        );
        let matcher: AllOf<'_, String> = AllOf::new()
            .and(StartsWith::new("a"))
            .and(MatchesBefore::millis(10, slow));

        let mut desc = Description::new();
        assert_eq!(
            matcher.verdict(&"abc".to_string(), &mut desc),
            Verdict::Timeout(Duration::from_millis(10))
        );
        assert_eq!(
            desc.as_str(),
            "slow runs in less than <10> milliseconds Timeout after <10> milliseconds"
        );
    }

    #[test]
    fn empty_conjunction_matches_anything() {
        let matcher: AllOf<'_, str> = AllOf::new();
        assert!(matcher.is_empty());
        assert!(matcher.matches("anything"));
        assert_eq!(matcher.expectation(), "()");
    }
}
