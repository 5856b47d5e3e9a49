use std::fmt;

use crate::{Description, Matcher, Refutation};

/// Matches a matcher that rejects the given arguments with an exact message.
///
/// The message is compared in the same shape an [`Assertion`](crate::Assertion)
/// reports it, so a test pins down both the expectation and the mismatch text.
///
/// ```rust
/// use affirm::{Assertion, matchers::{Mismatches, TextIs}};
///
/// Assertion::value(
///     "explains the difference",
///     TextIs::new("abc"),
///     Mismatches::new("xyz", "Text with value \"abc\"", "Text is \"xyz\""),
/// )
/// .affirm()
/// .unwrap();
/// ```
pub struct Mismatches<X> {
    args: X,
    shown: String,
    message: String,
}

impl<X> fmt::Debug for Mismatches<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mismatches")
            .field("args", &self.shown)
            .field("message", &self.message)
            .finish()
    }
}

impl<X: fmt::Debug> Mismatches<X> {
    pub fn new(args: X, expected: impl fmt::Display, actual: impl fmt::Display) -> Self {
        let shown = format!("{args:?}");
        Self {
            args,
            shown,
            message: format!("\nExpected: {expected}\n but was: {actual}"),
        }
    }
}

impl<X> Mismatches<X> {
    /// The failure message produced by `matcher`, or `None` if it matched.
    fn refute<M: Matcher<X>>(&self, matcher: &M) -> Option<String> {
        let mut mismatch = Description::new();
        if matcher.evaluate(&self.args, &mut mismatch) {
            return None;
        }
        let refutation = Refutation::new("", Matcher::<X>::expectation(matcher), mismatch);
        Some(refutation.to_string())
    }
}

impl<X, M> Matcher<M> for Mismatches<X>
where
    M: Matcher<X>,
{
    fn matches(&self, actual: &M) -> bool {
        self.refute(actual).is_some_and(|msg| msg == self.message)
    }

    fn describe_to(&self, desc: &mut Description) {
        desc.append_text("Mismatches ")
            .append_text(&self.shown)
            .append_text(" with message ")
            .append_quoted(&self.message);
    }

    fn describe_mismatch(&self, actual: &M, desc: &mut Description) {
        self.evaluate(actual, desc);
    }

    fn evaluate(&self, actual: &M, mismatch: &mut Description) -> bool {
        match self.refute(actual) {
            Some(msg) if msg == self.message => true,
            Some(msg) => {
                mismatch.append_quoted(&msg);
                false
            }
            None => {
                mismatch.append_text("matched");
                false
            }
        }
    }
}
