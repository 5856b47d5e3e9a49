use std::{fmt, time::Duration};

use crate::{Refutation, description::Millis};

/// Errors raised while building matchers and harnesses.
///
/// Evaluation failures are reported separately through [`AffirmError`], so a
/// misconfigured check can never be mistaken for a refuted one.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("a concurrent run needs at least one thread")]
    NoThreads,

    #[error("Invalid regular expression: {0}")]
    Regex(#[from] regex::Error),
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NoThreads, Self::NoThreads) => true,
            (Self::Regex(a), Self::Regex(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl Eq for Error {}

/// Why an [`Assertion`](crate::Assertion) did not hold.
///
/// - [`Refuted`](Self::Refuted) is the ordinary test failure: the matcher
///   rejected the value.
/// - [`TimedOut`](Self::TimedOut) is a refutation caused by a deadline, kept
///   apart so a slow answer is never confused with a wrong one.
/// - [`Fatal`](Self::Fatal) carries the producer's own error, untouched. The
///   active matcher was not built to interpret errors, so this points at the
///   test setup rather than at the code under test.
/// - [`All`](Self::All) collects every failure of an
///   [`AssertAll`](crate::AssertAll) group.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AffirmError<E> {
    #[error("{0}")]
    Refuted(Refutation),

    #[error("{reason}\nTimeout after {} milliseconds", Millis::of(.after))]
    TimedOut { reason: String, after: Duration },

    #[error("unexpected error during evaluation: {0}")]
    Fatal(E),

    #[error("{description}{failures}")]
    All {
        description: String,
        failures: Failures<E>,
    },
}

/// Failures collected from a group of assertions, in evaluation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failures<E>(Vec<AffirmError<E>>);

impl<E> Failures<E> {
    pub(crate) fn new(failures: Vec<AffirmError<E>>) -> Self {
        Self(failures)
    }

    pub fn as_slice(&self) -> &[AffirmError<E>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<E: fmt::Display> fmt::Display for Failures<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in &self.0 {
            write!(f, "\n\n{failure}")?;
        }
        Ok(())
    }
}

impl<E> AffirmError<E> {
    /// Returns `true` for every variant except `Fatal`.
    pub fn is_failure(&self) -> bool {
        !self.is_fatal()
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, AffirmError::Fatal(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, AffirmError::TimedOut { .. })
    }

    /// Returns the structured refutation, if the matcher rejected the value.
    pub fn refutation(&self) -> Option<&Refutation> {
        match self {
            AffirmError::Refuted(refutation) => Some(refutation),
            _ => None,
        }
    }

    /// Returns the collected failures of an [`AssertAll`](crate::AssertAll)
    /// group.
    pub fn failures(&self) -> Option<&[AffirmError<E>]> {
        match self {
            AffirmError::All { failures, .. } => Some(failures.as_slice()),
            _ => None,
        }
    }

    /// Returns the producer's error, if evaluation failed fatally.
    pub fn into_fatal(self) -> Option<E> {
        match self {
            AffirmError::Fatal(e) => Some(e),
            _ => None,
        }
    }
}
