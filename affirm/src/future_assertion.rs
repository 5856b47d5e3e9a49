use std::{
    fmt,
    future::{Future, IntoFuture},
    pin::Pin,
    time::Duration,
};

use crate::{AffirmError, Description, Matcher, Refutation};

/// Default deadline for a [`FutureAssertion`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// An [`Assertion`](crate::Assertion) over the result of a future.
///
/// Awaiting it polls the future under a deadline and then hands the value to
/// the matcher. If the deadline passes first the future is dropped, which
/// cancels it, and the assertion fails with [`AffirmError::TimedOut`].
/// Needs a Tokio runtime with the time driver enabled.
///
/// # Example
///
/// ```rust
/// use std::{convert::Infallible, time::Duration};
/// use affirm::{FutureAssertion, matchers::IsEqual};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), affirm::AffirmError<Infallible>> {
/// FutureAssertion::new(
///     "answer arrives quickly",
///     async { Ok::<_, Infallible>(42) },
///     IsEqual::new(42),
/// )
/// .within(Duration::from_millis(100))
/// .await?;
/// # Ok(())
/// # }
/// ```
pub struct FutureAssertion<'a, T, E> {
    reason: String,
    future: BoxFuture<'a, Result<T, E>>,
    matcher: Box<dyn Matcher<T> + 'a>,
    timeout: Duration,
}

impl<'a, T, E> FutureAssertion<'a, T, E> {
    pub fn new<F, M>(reason: impl Into<String>, future: F, matcher: M) -> Self
    where
        F: Future<Output = Result<T, E>> + 'a,
        M: Matcher<T> + 'a,
    {
        Self {
            reason: reason.into(),
            future: Box::pin(future),
            matcher: Box::new(matcher),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the default 1-second timeout.
    pub fn within(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }

    async fn run(self) -> Result<(), AffirmError<E>> {
        let value = match tokio::time::timeout(self.timeout, self.future).await {
            Ok(Ok(value)) => value,
            Ok(Err(e)) => return Err(AffirmError::Fatal(e)),
            Err(_) => {
                tracing::warn!(
                    reason = %self.reason,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "future did not resolve before the deadline"
                );
                return Err(AffirmError::TimedOut {
                    reason: self.reason,
                    after: self.timeout,
                });
            }
        };

        let mut mismatch = Description::new();
        if self.matcher.evaluate(&value, &mut mismatch) {
            return Ok(());
        }
        let expected = Matcher::<T>::expectation(&*self.matcher);
        tracing::debug!(reason = %self.reason, expected = %expected, "assertion refuted");
        Err(AffirmError::Refuted(Refutation::new(
            self.reason,
            expected,
            mismatch,
        )))
    }
}

impl<'a, T: 'a, E: 'a> IntoFuture for FutureAssertion<'a, T, E> {
    type Output = Result<(), AffirmError<E>>;
    type IntoFuture = BoxFuture<'a, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.run())
    }
}

impl<T, E> fmt::Debug for FutureAssertion<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FutureAssertion")
            .field("reason", &self.reason)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        convert::Infallible,
        sync::atomic::{AtomicBool, Ordering},
        time::Instant,
    };

    use super::*;
    use crate::matchers::{IsEqual, TextIs};

    #[tokio::test]
    async fn resolves_and_matches() {
        FutureAssertion::new(
            "greets",
            async { Ok::<_, Infallible>("hello".to_string()) },
            TextIs::new("hello"),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn refutes_wrong_value() {
        let err = FutureAssertion::new("sum", async { Ok::<_, Infallible>(2 + 2) }, IsEqual::new(5))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "sum\nExpected: <5>\n but was: was <4>");
    }

    #[tokio::test]
    async fn error_result_is_fatal() {
        let err = FutureAssertion::new("load", async { Err::<u8, _>("disk on fire") }, IsEqual::new(1))
            .await
            .unwrap_err();
        assert_eq!(err.into_fatal(), Some("disk on fire"));
    }

    #[tokio::test]
    async fn times_out_and_drops_the_future() {
        let finished = AtomicBool::new(false);
        let started = Instant::now();
        let err = FutureAssertion::new(
            "must resolve in 20 milliseconds",
            async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                finished.store(true, Ordering::SeqCst);
                Ok::<_, Infallible>(())
            },
            IsEqual::new(()),
        )
        .within(Duration::from_millis(20))
        .await
        .unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(err.is_timeout());
        assert_eq!(
            err.to_string(),
            "must resolve in 20 milliseconds\nTimeout after 20 milliseconds"
        );
        assert!(!finished.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn borrows_from_the_test() {
        let expected = String::from("local");
        let source = expected.clone();
        FutureAssertion::new(
            "reads borrowed state",
            async { Ok::<_, Infallible>(source.as_str()) },
            TextIs::new(expected.as_str()),
        )
        .await
        .unwrap();
    }
}
