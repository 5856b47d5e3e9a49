use std::{convert::Infallible, fmt, time::Duration};

use crate::AffirmError;

/// A failed match, with the text needed to report it.
///
/// Renders as three lines, the last two being a stable contract for tools
/// that parse failure output:
///
/// ```text
/// <reason>
/// Expected: <expectation>
///  but was: <mismatch>
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Refutation {
    reason: String,
    expected: String,
    actual: String,
}

impl Refutation {
    pub fn new(
        reason: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            reason: reason.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    /// The matcher's expectation.
    #[inline]
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// The matcher's mismatch description.
    #[inline]
    pub fn actual(&self) -> &str {
        &self.actual
    }
}

impl fmt::Display for Refutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\nExpected: {}\n but was: {}",
            self.reason, self.expected, self.actual
        )
    }
}

/// How a single match went, as reported by
/// [`Matcher::verdict`](crate::Matcher::verdict).
///
/// Keeps a missed deadline apart from a wrong answer all the way up to the
/// [`Assertion`](crate::Assertion) that asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Match,
    Mismatch,
    /// The check did not finish within the given deadline.
    Timeout(Duration),
}

impl Verdict {
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Match)
    }
}

impl From<bool> for Verdict {
    fn from(matched: bool) -> Self {
        if matched {
            Verdict::Match
        } else {
            Verdict::Mismatch
        }
    }
}

/// Result of a single evaluation.
///
/// Created fresh for every evaluation and never mutated. `Timeout` is kept
/// apart from `Mismatch` so "too slow" and "wrong answer" stay
/// distinguishable, and `UnexpectedError` carries an error nobody was
/// prepared to interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<E = Infallible> {
    Pass,
    Mismatch(Refutation),
    Timeout(Duration),
    UnexpectedError(E),
}

impl<E> Outcome<E> {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Outcome::Mismatch(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Outcome::Timeout(_))
    }

    /// Converts into the result returned by `affirm`.
    ///
    /// A bare `Timeout` has no reason of its own, so it is reported with an
    /// empty one; see [`into_result_with`](Self::into_result_with).
    pub fn into_result(self) -> Result<(), AffirmError<E>> {
        self.into_result_with("")
    }

    /// Like [`into_result`](Self::into_result), naming `reason` on a timeout.
    pub fn into_result_with(self, reason: impl Into<String>) -> Result<(), AffirmError<E>> {
        match self {
            Outcome::Pass => Ok(()),
            Outcome::Mismatch(refutation) => Err(AffirmError::Refuted(refutation)),
            Outcome::Timeout(after) => Err(AffirmError::TimedOut {
                reason: reason.into(),
                after,
            }),
            Outcome::UnexpectedError(e) => Err(AffirmError::Fatal(e)),
        }
    }
}

impl<E> fmt::Display for Outcome<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Pass => write!(f, "Pass"),
            Outcome::Mismatch(_) => write!(f, "Mismatch"),
            Outcome::Timeout(_) => write!(f, "Timeout"),
            Outcome::UnexpectedError(_) => write!(f, "UnexpectedError"),
        }
    }
}
