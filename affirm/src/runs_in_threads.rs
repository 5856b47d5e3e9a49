use std::{fmt, num::NonZeroUsize, sync::Barrier};

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::{Config, Description, Error, Matcher, Result};

/// Matches a function that succeeds when called from many threads at once.
///
/// Each evaluation builds a pool of exactly `N` threads and submits `N`
/// trials. Every trial first waits at a shared gate; the gate opens only when
/// all `N` trials are parked on it, so they hit the candidate as close to the
/// same instant as the scheduler allows. The candidate matches when all `N`
/// trials return `true`.
///
/// ```text
/// Idle -> WorkersEnqueued -> BarrierReleased -> Collecting -> Reduced
/// ```
///
/// The pool lives only for one evaluation and is torn down when it returns,
/// whether the candidate matched, mismatched or panicked. A panic inside the
/// candidate is re-raised on the calling thread once the other trials finish.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use affirm::{Matcher, RunsInThreads};
///
/// let harness = RunsInThreads::with_threads(AtomicUsize::new(0), 8)?;
/// let increment = |counter: &AtomicUsize| {
///     counter.fetch_add(1, Ordering::SeqCst);
///     true
/// };
/// assert!(harness.matches(&increment));
/// assert_eq!(harness.input().load(Ordering::SeqCst), 8);
/// # Ok::<(), affirm::Error>(())
/// ```
pub struct RunsInThreads<T> {
    input: T,
    threads: NonZeroUsize,
    thread_name_prefix: String,
    stack_size: Option<usize>,
}

impl<T> fmt::Debug for RunsInThreads<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunsInThreads")
            .field("threads", &self.threads)
            .field("thread_name_prefix", &self.thread_name_prefix)
            .field("stack_size", &self.stack_size)
            .finish_non_exhaustive()
    }
}

impl RunsInThreads<()> {
    /// Harness for candidates that take no input.
    pub fn without_input() -> Self {
        Self::new(())
    }
}

impl<T> RunsInThreads<T> {
    /// Harness with the default worker count, see [`Config::threads`].
    pub fn new(input: T) -> Self {
        Self::with_config(input, &Config::default())
    }

    /// Harness with an explicit worker count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoThreads`] if `threads` is zero.
    pub fn with_threads(input: T, threads: usize) -> Result<Self> {
        let threads = NonZeroUsize::new(threads).ok_or(Error::NoThreads)?;
        Ok(Self {
            threads,
            ..Self::new(input)
        })
    }

    /// Harness using the worker count and thread settings of `config`.
    pub fn with_config(input: T, config: &Config) -> Self {
        Self {
            input,
            threads: config.threads(),
            thread_name_prefix: config.thread_name_prefix().to_string(),
            stack_size: config.stack_size(),
        }
    }

    /// The input handed to every trial.
    pub fn input(&self) -> &T {
        &self.input
    }

    /// The number of trials per evaluation.
    pub fn threads(&self) -> NonZeroUsize {
        self.threads
    }

    fn build_pool(&self) -> std::result::Result<ThreadPool, ThreadPoolBuildError> {
        let prefix = self.thread_name_prefix.clone();
        let mut builder = ThreadPoolBuilder::new()
            .num_threads(self.threads.get())
            .thread_name(move |index| format!("{prefix}-{index}"));
        if let Some(bytes) = self.stack_size {
            builder = builder.stack_size(bytes);
        }
        builder.build()
    }

    /// Runs all trials and returns how many of them succeeded.
    fn run<F>(&self, candidate: &F) -> std::result::Result<usize, ThreadPoolBuildError>
    where
        T: Sync,
        F: Fn(&T) -> bool + Sync,
    {
        let total = self.threads.get();
        let pool = self.build_pool()?;
        let gate = Barrier::new(total + 1);
        let mut slots: Vec<Option<bool>> = vec![None; total];

        pool.in_place_scope(|scope| {
            for slot in slots.iter_mut() {
                let gate = &gate;
                let input = &self.input;
                scope.spawn(move |_| {
                    gate.wait();
                    *slot = Some(candidate(input));
                });
            }
            gate.wait();
            tracing::trace!(threads = total, "gate released");
        });

        // every slot has been written by its own trial once the scope joined
        let succeeded = slots.iter().filter(|slot| **slot == Some(true)).count();
        tracing::debug!(threads = total, succeeded, "concurrent run finished");
        Ok(succeeded)
    }
}

impl<T, F> Matcher<F> for RunsInThreads<T>
where
    T: Sync,
    F: Fn(&T) -> bool + Sync,
{
    fn matches(&self, candidate: &F) -> bool {
        self.evaluate(candidate, &mut Description::new())
    }

    fn describe_to(&self, desc: &mut Description) {
        desc.append_text("runs in ")
            .append_value(&self.threads.get())
            .append_text(" threads successfully");
    }

    /// Runs the trials again; the tally of the earlier run is not kept.
    fn describe_mismatch(&self, candidate: &F, desc: &mut Description) {
        self.evaluate(candidate, desc);
    }

    fn evaluate(&self, candidate: &F, mismatch: &mut Description) -> bool {
        let total = self.threads.get();
        match self.run(candidate) {
            Ok(succeeded) if succeeded == total => true,
            Ok(succeeded) => {
                mismatch
                    .append_text("ran successfully in ")
                    .append_value(&succeeded)
                    .append_text(" of ")
                    .append_value(&total)
                    .append_text(" threads");
                false
            }
            Err(e) => {
                tracing::error!(threads = total, error = %e, "could not start worker pool");
                mismatch
                    .append_text("could not start ")
                    .append_value(&total)
                    .append_text(" worker threads: ")
                    .append_text(e.to_string());
                false
            }
        }
    }
}
