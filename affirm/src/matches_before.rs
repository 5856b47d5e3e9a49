use std::{
    fmt, panic,
    sync::{
        Arc,
        mpsc::{self, RecvTimeoutError},
    },
    thread,
    time::Duration,
};

use tokio_util::sync::CancellationToken;

use crate::{Description, Matcher, Outcome, Refutation, Verdict};

enum Run {
    Completed { matched: bool, mismatch: Description },
    TimedOut,
    NotDispatched(std::io::Error),
}

/// Wraps a matcher with a deadline.
///
/// The inner matcher runs on a dedicated thread while the caller waits at
/// most `deadline` for its verdict.
///
/// ```text
/// NotStarted -> Running -> Completed | TimedOut
/// ```
///
/// - **Completed**: the inner verdict and mismatch text are passed through
///   unchanged.
/// - **TimedOut**: the match fails with `Timeout after <ms> milliseconds` and
///   [`verdict`](Matcher::verdict) reports [`Verdict::Timeout`], so an
///   [`Assertion`](crate::Assertion) returns
///   [`AffirmError::TimedOut`](crate::AffirmError::TimedOut). It is a match
///   failure, not an error.
/// - **Panicked**: a panic in the inner matcher is re-raised on the caller
///   thread with its original payload.
///
/// # Owned values
///
/// The value under test is cloned into the deadline worker, so `T` must be
/// `Clone + Send + 'static`. Checks over borrowed data, or over values that
/// cannot be cloned such as a [`RunsInThreads`](crate::RunsInThreads), have
/// to be wrapped the other way round: put the deadline on the inner matcher
/// they use, or share the data through an `Arc`.
///
/// Deadlines finer than a millisecond are described as fractions, e.g.
/// `runs in less than <0.9> milliseconds`.
///
/// # Cancellation
///
/// A timed-out worker is abandoned, not killed. It is handed a cancellation
/// token which it checks before it starts and after it finishes; a result
/// produced after the deadline is discarded. The inner computation itself may
/// still run to completion in the background, so it must not leave shared
/// state half-updated in a way other checks depend on.
///
/// # Example
///
/// ```rust
/// use affirm::{Matcher, MatchesBefore, matchers::TextIs};
///
/// let matcher = MatchesBefore::millis(1000, TextIs::new("ready"));
/// assert!(matcher.matches(&"ready"));
/// assert_eq!(
///     Matcher::<&str>::expectation(&matcher),
///     "Text with value \"ready\" runs in less than <1000> milliseconds"
/// );
/// ```
pub struct MatchesBefore<M> {
    deadline: Duration,
    inner: Arc<M>,
}

impl<M> fmt::Debug for MatchesBefore<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchesBefore")
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

impl<M> Clone for MatchesBefore<M> {
    fn clone(&self) -> Self {
        Self {
            deadline: self.deadline,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<M> MatchesBefore<M> {
    pub fn new(deadline: Duration, inner: M) -> Self {
        Self {
            deadline,
            inner: Arc::new(inner),
        }
    }

    /// Deadline given in milliseconds.
    pub fn millis(deadline: u64, inner: M) -> Self {
        Self::new(Duration::from_millis(deadline), inner)
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    fn append_deadline(&self, desc: &mut Description) {
        desc.append_millis(self.deadline).append_text(" milliseconds");
    }

    fn run<T>(&self, actual: &T) -> Run
    where
        T: Clone + Send + 'static,
        M: Matcher<T> + Send + Sync + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(1);
        let token = CancellationToken::new();
        let worker_token = token.clone();
        let inner = Arc::clone(&self.inner);
        let value = actual.clone();

        let spawned = thread::Builder::new()
            .name("affirm-deadline".to_string())
            .spawn(move || {
                if worker_token.is_cancelled() {
                    return;
                }
                let mut mismatch = Description::new();
                let matched = inner.evaluate(&value, &mut mismatch);
                if worker_token.is_cancelled() {
                    tracing::debug!("discarding result produced after the deadline");
                    return;
                }
                // the caller may have stopped listening between the check and the send
                let _ = sender.send((matched, mismatch));
            });
        let worker = match spawned {
            Ok(worker) => worker,
            Err(e) => return Run::NotDispatched(e),
        };

        match receiver.recv_timeout(self.deadline) {
            Ok((matched, mismatch)) => Run::Completed { matched, mismatch },
            Err(RecvTimeoutError::Timeout) => {
                token.cancel();
                tracing::warn!(
                    deadline = ?self.deadline,
                    "check did not finish before the deadline"
                );
                Run::TimedOut
            }
            Err(RecvTimeoutError::Disconnected) => match worker.join() {
                Err(payload) => panic::resume_unwind(payload),
                // the worker only returns without sending once cancelled
                Ok(()) => Run::TimedOut,
            },
        }
    }

    /// Runs the inner matcher under the deadline and reports how it went.
    pub fn outcome<T>(&self, actual: &T) -> Outcome
    where
        T: Clone + Send + 'static,
        M: Matcher<T> + Send + Sync + 'static,
    {
        let mut mismatch = Description::new();
        match Matcher::<T>::verdict(self, actual, &mut mismatch) {
            Verdict::Match => Outcome::Pass,
            Verdict::Mismatch => Outcome::Mismatch(Refutation::new(
                "",
                Matcher::<T>::expectation(self),
                mismatch,
            )),
            Verdict::Timeout(after) => Outcome::Timeout(after),
        }
    }
}

impl<T, M> Matcher<T> for MatchesBefore<M>
where
    T: Clone + Send + 'static,
    M: Matcher<T> + Send + Sync + 'static,
{
    fn matches(&self, actual: &T) -> bool {
        self.evaluate(actual, &mut Description::new())
    }

    fn describe_to(&self, desc: &mut Description) {
        Matcher::<T>::describe_to(&*self.inner, desc);
        desc.append_text(" runs in less than ");
        self.append_deadline(desc);
    }

    /// Runs the inner matcher again under the deadline.
    fn describe_mismatch(&self, actual: &T, desc: &mut Description) {
        self.evaluate(actual, desc);
    }

    fn evaluate(&self, actual: &T, mismatch: &mut Description) -> bool {
        self.verdict(actual, mismatch).is_match()
    }

    fn verdict(&self, actual: &T, mismatch: &mut Description) -> Verdict {
        match self.run(actual) {
            Run::Completed {
                matched,
                mismatch: inner,
            } => {
                if !matched {
                    mismatch.append_text(inner.as_str());
                }
                matched.into()
            }
            Run::TimedOut => {
                mismatch.append_text("Timeout after ");
                self.append_deadline(mismatch);
                Verdict::Timeout(self.deadline)
            }
            Run::NotDispatched(e) => {
                mismatch.append_text(format!("could not dispatch the check: {e}"));
                Verdict::Mismatch
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Instant,
    };

    use super::*;
    use crate::{
        Assertion,
        matchers::{IsEqual, MatcherOf, Mismatches, TextIs},
    };

    /// A text matcher that takes its time.
    fn slow_text(expected: &'static str, delay: Duration) -> impl Matcher<String> + Send + Sync {
        MatcherOf::new(
            move |actual: &String| {
                thread::sleep(delay);
                actual == expected
            },
            move |desc: &mut Description| {
                desc.append_text("Text with value ").append_quoted(expected);
            },
            |actual: &String, desc: &mut Description| {
                desc.append_text("Text is ").append_quoted(actual);
            },
        )
    }

    #[test]
    fn matches_within_deadline() {
        Assertion::value(
            "must run in 1000 milliseconds maximum",
            "test".to_string(),
            MatchesBefore::millis(1000, TextIs::new("test")),
        )
        .affirm()
        .unwrap();
    }

    #[test]
    fn forwards_inner_mismatch() {
        Assertion::value(
            "must fail because of matcher",
            MatchesBefore::millis(1000, TextIs::new("a")),
            Mismatches::new(
                "b".to_string(),
                "Text with value \"a\" runs in less than <1000> milliseconds",
                "Text is \"b\"",
            ),
        )
        .affirm()
        .unwrap();
    }

    #[test]
    fn transparent_on_the_happy_path() {
        let inner = IsEqual::new(7);
        let bounded = MatchesBefore::millis(1000, IsEqual::new(7));
        for value in [6, 7, 8] {
            assert_eq!(bounded.matches(&value), inner.matches(&value));
        }
        let mut desc = Description::new();
        assert!(!bounded.evaluate(&6, &mut desc));
        assert_eq!(desc.as_str(), inner.mismatch(&6));
    }

    #[test]
    fn times_out_with_deadline_in_description() {
        let matcher = MatchesBefore::millis(10, slow_text("c", Duration::from_millis(1000)));

        let started = Instant::now();
        let mut desc = Description::new();
        assert!(!matcher.evaluate(&"c".to_string(), &mut desc));
        assert!(started.elapsed() < Duration::from_millis(500));

        assert_eq!(desc.as_str(), "Timeout after <10> milliseconds");
        assert_eq!(
            Matcher::<String>::expectation(&matcher),
            "Text with value \"c\" runs in less than <10> milliseconds"
        );
    }

    #[test]
    fn outcome_distinguishes_timeout_from_mismatch() {
        let slow = MatchesBefore::millis(10, slow_text("c", Duration::from_millis(1000)));
        assert_eq!(
            slow.outcome(&"c".to_string()),
            Outcome::Timeout(Duration::from_millis(10))
        );

        let wrong = MatchesBefore::millis(1000, TextIs::new("a"));
        let Outcome::Mismatch(refutation) = wrong.outcome(&"b".to_string()) else {
            panic!("expected a mismatch");
        };
        assert_eq!(refutation.actual(), "Text is \"b\"");

        assert!(wrong.outcome(&"a".to_string()).is_pass());
    }

    #[test]
    fn late_result_is_discarded() {
        let finished = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&finished);
        let matcher = MatchesBefore::millis(
            5,
            MatcherOf::new(
                move |_: &u8| {
                    thread::sleep(Duration::from_millis(50));
                    observed.fetch_add(1, Ordering::SeqCst);
                    true
                },
                |desc: &mut Description| {
                    desc.append_text("anything");
                },
                |_: &u8, _: &mut Description| {},
            ),
        );

        assert!(!matcher.matches(&0));
        // the abandoned worker still runs to completion
        thread::sleep(Duration::from_millis(200));
        assert_eq!(finished.load(Ordering::SeqCst), 1);
    }

    #[test]
    #[should_panic(expected = "computation failed")]
    fn inner_panic_is_fatal() {
        let matcher = MatchesBefore::millis(
            1000,
            MatcherOf::new(
                |_: &u8| -> bool { panic!("computation failed") },
                |desc: &mut Description| {
                    desc.append_text("never");
                },
                |_: &u8, _: &mut Description| {},
            ),
        );
        matcher.matches(&1);
    }

    #[test]
    fn assertion_reports_missed_deadline_as_timeout() {
        let err = Assertion::value(
            "must answer in 10 milliseconds",
            "c".to_string(),
            MatchesBefore::millis(10, slow_text("c", Duration::from_millis(300))),
        )
        .affirm()
        .unwrap_err();

        assert!(err.is_timeout());
        assert!(err.refutation().is_none());
        assert_eq!(
            err.to_string(),
            "must answer in 10 milliseconds\nTimeout after 10 milliseconds"
        );
    }

    #[test]
    fn wrong_answer_is_not_a_timeout() {
        let err = Assertion::value(
            "must be a",
            "b".to_string(),
            MatchesBefore::millis(1000, TextIs::new("a")),
        )
        .affirm()
        .unwrap_err();
        assert!(!err.is_timeout());
        assert_eq!(err.refutation().unwrap().actual(), "Text is \"b\"");
    }

    #[test]
    fn sub_millisecond_deadline_is_not_truncated() {
        let matcher = MatchesBefore::new(
            Duration::from_micros(900),
            slow_text("c", Duration::from_millis(300)),
        );
        assert_eq!(
            Matcher::<String>::expectation(&matcher),
            "Text with value \"c\" runs in less than <0.9> milliseconds"
        );
        let mut desc = Description::new();
        assert_eq!(
            matcher.verdict(&"c".to_string(), &mut desc),
            Verdict::Timeout(Duration::from_micros(900))
        );
        assert_eq!(desc.as_str(), "Timeout after <0.9> milliseconds");
    }

    #[test]
    fn expectation_is_idempotent() {
        let matcher = MatchesBefore::millis(20, TextIs::new("x"));
        assert_eq!(
            Matcher::<String>::expectation(&matcher),
            Matcher::<String>::expectation(&matcher)
        );
    }
}
