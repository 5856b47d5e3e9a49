use std::{convert::Infallible, fmt};

use crate::{AffirmError, Description, Matcher, Outcome, Refutation, Verdict};

type Producer<'a, T, E> = Box<dyn FnOnce() -> Result<T, E> + 'a>;

enum Check<'a, T, E> {
    /// Sees only successful values; a producer error is fatal.
    Value(Box<dyn Matcher<T> + 'a>),
    /// Sees the whole result, so it can expect an error.
    Result(Box<dyn Matcher<Result<T, E>> + 'a>),
}

/// A reason, a computation under test and a matcher, evaluated by
/// [`affirm`](Self::affirm).
///
/// Evaluation consumes the assertion. The producer runs exactly once and its
/// result is held by value while the matcher inspects it, so a
/// non-idempotent producer (one that bumps a counter, say) is never
/// re-triggered by the matcher or by the failure description.
///
/// Errors returned by the producer are fatal unless the assertion was built
/// with [`expecting_error`](Self::expecting_error): an expected failure has to
/// be declared, it is never inferred. A fatal error is handed back as it was
/// returned, so any error type works, `Clone` or not.
///
/// # Example
///
/// ```rust
/// use affirm::{Assertion, matchers::IsEqual};
///
/// let assertion = Assertion::value("two and two make four", 2 + 2, IsEqual::new(4));
/// assert!(assertion.affirm().is_ok());
///
/// let err = Assertion::value("two and two make five", 2 + 2, IsEqual::new(5))
///     .affirm()
///     .unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "two and two make five\nExpected: <5>\n but was: was <4>"
/// );
/// ```
pub struct Assertion<'a, T, E = Infallible> {
    reason: String,
    producer: Producer<'a, T, E>,
    check: Check<'a, T, E>,
}

impl<T, E> fmt::Debug for Assertion<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = match self.check {
            Check::Value(_) => "value",
            Check::Result(_) => "result",
        };
        f.debug_struct("Assertion")
            .field("reason", &self.reason)
            .field("check", &check)
            .finish_non_exhaustive()
    }
}

impl<'a, T, E> Assertion<'a, T, E> {
    /// Build an assertion whose producer is expected to succeed.
    ///
    /// If the producer returns an error, [`affirm`](Self::affirm) hands it
    /// back unchanged as [`AffirmError::Fatal`].
    pub fn new<P, M>(reason: impl Into<String>, producer: P, matcher: M) -> Self
    where
        P: FnOnce() -> Result<T, E> + 'a,
        M: Matcher<T> + 'a,
    {
        Self::with_check(reason, producer, Check::Value(Box::new(matcher)))
    }

    /// Build an assertion whose matcher inspects the producer's whole result,
    /// errors included. Use with [`Throws`](crate::matchers::Throws).
    pub fn expecting_error<P, M>(reason: impl Into<String>, producer: P, matcher: M) -> Self
    where
        P: FnOnce() -> Result<T, E> + 'a,
        M: Matcher<Result<T, E>> + 'a,
    {
        Self::with_check(reason, producer, Check::Result(Box::new(matcher)))
    }

    fn with_check<P>(reason: impl Into<String>, producer: P, check: Check<'a, T, E>) -> Self
    where
        P: FnOnce() -> Result<T, E> + 'a,
    {
        Self {
            reason: reason.into(),
            producer: Box::new(producer),
            check,
        }
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// Evaluate the assertion.
    ///
    /// # Errors
    ///
    /// - [`AffirmError::Refuted`] when the matcher rejects the value.
    /// - [`AffirmError::TimedOut`] when the matcher gave up at a deadline,
    ///   e.g. a [`MatchesBefore`](crate::MatchesBefore).
    /// - [`AffirmError::Fatal`] when the producer failed and the matcher does
    ///   not expect errors.
    pub fn affirm(self) -> Result<(), AffirmError<E>> {
        let reason = self.reason.clone();
        let result = self.outcome().into_result_with(reason);
        match &result {
            Err(AffirmError::Refuted(refutation)) => {
                tracing::debug!(reason = %refutation.reason(), expected = %refutation.expected(), "assertion refuted");
            }
            Err(AffirmError::TimedOut { reason, after }) => {
                tracing::debug!(reason = %reason, after = ?after, "assertion timed out");
            }
            _ => {}
        }
        result
    }

    /// Evaluate the assertion and return the raw outcome.
    pub fn outcome(self) -> Outcome<E> {
        let produced = (self.producer)();

        let mut mismatch = Description::new();
        let (verdict, expected) = match self.check {
            Check::Value(matcher) => match produced {
                Err(e) => return Outcome::UnexpectedError(e),
                Ok(value) => (
                    matcher.verdict(&value, &mut mismatch),
                    Matcher::<T>::expectation(&*matcher),
                ),
            },
            Check::Result(matcher) => (
                matcher.verdict(&produced, &mut mismatch),
                Matcher::<Result<T, E>>::expectation(&*matcher),
            ),
        };

        match verdict {
            Verdict::Match => Outcome::Pass,
            Verdict::Mismatch => {
                Outcome::Mismatch(Refutation::new(self.reason, expected, mismatch))
            }
            Verdict::Timeout(after) => Outcome::Timeout(after),
        }
    }
}

impl<'a, T> Assertion<'a, T, Infallible> {
    /// Build an assertion over an already computed value.
    pub fn value<M>(reason: impl Into<String>, value: T, matcher: M) -> Self
    where
        T: 'a,
        M: Matcher<T> + 'a,
    {
        Self::new(reason, move || Ok(value), matcher)
    }
}
