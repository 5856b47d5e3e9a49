use std::{num::NonZeroUsize, thread};

/// Worker pool settings for [`RunsInThreads`](crate::RunsInThreads).
///
/// Use the builder pattern to customize, or use [`Default`] for sensible
/// defaults.
///
/// # Examples
///
/// ```rust
/// use std::num::NonZeroUsize;
/// use affirm::Config;
///
/// let config = Config::default()
///     .with_threads_per_core(NonZeroUsize::new(4).unwrap()) // Fewer threads per core
///     .with_thread_name_prefix("race")                      // Shows up in panics and profilers
///     .with_stack_size(256 * 1024);                         // Smaller worker stacks
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Workers started per available core.
    /// Default: 16
    threads_per_core: NonZeroUsize,

    /// Prefix for worker thread names; the worker index is appended.
    /// Default: "affirm-worker"
    thread_name_prefix: String,

    /// Stack size of each worker thread, in bytes.
    /// Default: the platform default
    stack_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            threads_per_core: Self::DEFAULT_THREADS_PER_CORE,
            thread_name_prefix: "affirm-worker".to_string(),
            stack_size: None,
        }
    }
}

impl Config {
    /// Default number of workers per available core.
    pub const DEFAULT_THREADS_PER_CORE: NonZeroUsize = NonZeroUsize::new(16).unwrap();

    /// Set the number of workers started per available core.
    pub fn with_threads_per_core(mut self, threads: NonZeroUsize) -> Self {
        self.threads_per_core = threads;
        self
    }

    /// Returns the number of workers started per available core.
    pub fn threads_per_core(&self) -> NonZeroUsize {
        self.threads_per_core
    }

    /// Set the prefix used to name worker threads.
    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Returns the prefix used to name worker threads.
    pub fn thread_name_prefix(&self) -> &str {
        &self.thread_name_prefix
    }

    /// Set the stack size of each worker thread, in bytes.
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    /// Returns the configured worker stack size, if any.
    pub fn stack_size(&self) -> Option<usize> {
        self.stack_size
    }

    /// Returns the worker count: available parallelism times
    /// [`threads_per_core`](Self::threads_per_core).
    ///
    /// Falls back to one core when the host parallelism cannot be queried.
    pub fn threads(&self) -> NonZeroUsize {
        thread::available_parallelism()
            .unwrap_or(NonZeroUsize::MIN)
            .saturating_mul(self.threads_per_core)
    }
}
