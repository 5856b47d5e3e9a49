use std::sync::Arc;

use crate::{Description, Verdict};

/// A predicate over values of type `T` that can explain itself.
///
/// Every check in this crate implements `Matcher`: the plain predicates in
/// [`matchers`](crate::matchers), the thread fan-out harness
/// [`RunsInThreads`](crate::RunsInThreads) and the deadline decorator
/// [`MatchesBefore`](crate::MatchesBefore). An [`Assertion`](crate::Assertion)
/// only ever talks to this trait, so all of them look the same to a test.
///
/// Implementations must not rely on side effects between calls. A matcher
/// that needs the observed value to describe a mismatch either recomputes it
/// in [`describe_mismatch`](Self::describe_mismatch) or overrides
/// [`evaluate`](Self::evaluate) to produce verdict and description from a
/// single run. Callers call `matches` before `describe_mismatch` for the same
/// value.
///
/// # Example
///
/// ```rust
/// use affirm::{Description, Matcher};
///
/// struct IsEven;
///
/// impl Matcher<u32> for IsEven {
///     fn matches(&self, actual: &u32) -> bool {
///         actual % 2 == 0
///     }
///
///     fn describe_to(&self, desc: &mut Description) {
///         desc.append_text("an even number");
///     }
///
///     fn describe_mismatch(&self, actual: &u32, desc: &mut Description) {
///         desc.append_value(actual).append_text(" is odd");
///     }
/// }
///
/// assert!(IsEven.matches(&4));
/// assert_eq!(IsEven.expectation(), "an even number");
/// assert_eq!(IsEven.mismatch(&3), "<3> is odd");
/// ```
pub trait Matcher<T: ?Sized> {
    /// Returns `true` if `actual` satisfies this matcher.
    fn matches(&self, actual: &T) -> bool;

    /// Writes what this matcher expects.
    fn describe_to(&self, desc: &mut Description);

    /// Writes why `actual` was rejected.
    fn describe_mismatch(&self, actual: &T, desc: &mut Description);

    /// Matches `actual` and, when it is rejected, describes the mismatch.
    ///
    /// Decorators call this on the matchers they wrap so that expensive
    /// checks run once per evaluation.
    fn evaluate(&self, actual: &T, mismatch: &mut Description) -> bool {
        let matched = self.matches(actual);
        if !matched {
            self.describe_mismatch(actual, mismatch);
        }
        matched
    }

    /// Like [`evaluate`](Self::evaluate), but says why a match failed.
    ///
    /// Matchers that enforce a deadline override this to report
    /// [`Verdict::Timeout`], which an [`Assertion`](crate::Assertion) turns
    /// into [`AffirmError::TimedOut`](crate::AffirmError::TimedOut). The
    /// mismatch description is written either way.
    fn verdict(&self, actual: &T, mismatch: &mut Description) -> Verdict {
        self.evaluate(actual, mismatch).into()
    }

    /// Returns the expectation as text.
    fn expectation(&self) -> String {
        let mut desc = Description::new();
        self.describe_to(&mut desc);
        desc.into_string()
    }

    /// Returns the mismatch description for `actual` as text.
    fn mismatch(&self, actual: &T) -> String {
        let mut desc = Description::new();
        self.describe_mismatch(actual, &mut desc);
        desc.into_string()
    }
}

macro_rules! forward_matcher {
    ($($ptr:ty),*) => {$(
        impl<T: ?Sized, M: Matcher<T> + ?Sized> Matcher<T> for $ptr {
            fn matches(&self, actual: &T) -> bool {
                (**self).matches(actual)
            }

            fn describe_to(&self, desc: &mut Description) {
                (**self).describe_to(desc)
            }

            fn describe_mismatch(&self, actual: &T, desc: &mut Description) {
                (**self).describe_mismatch(actual, desc)
            }

            fn evaluate(&self, actual: &T, mismatch: &mut Description) -> bool {
                (**self).evaluate(actual, mismatch)
            }

            fn verdict(&self, actual: &T, mismatch: &mut Description) -> Verdict {
                (**self).verdict(actual, mismatch)
            }
        }
    )*};
}

forward_matcher!(&M, Box<M>, Arc<M>);
