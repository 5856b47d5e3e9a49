#![cfg_attr(docsrs, feature(doc_cfg))]
//! # Affirm
//!
//! Matchers and assertions for checks that ordinary equality asserts cannot
//! express: "this function is safe to call from many threads at once" and
//! "this check gives its answer before a deadline".
//!
//! Every check is a [`Matcher`]: a predicate that can describe what it
//! expects and why a value fell short. An [`Assertion`] pairs a matcher with
//! a reason and the computation under test, and reports failures as
//!
//! ```text
//! <reason>
//! Expected: <expectation>
//!  but was: <mismatch>
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use affirm::{Assertion, RunsInThreads, matchers::Matches};
//!
//! let counter = AtomicUsize::new(0);
//! let increment = |counter: &&AtomicUsize| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//!     true
//! };
//!
//! Assertion::value(
//!     "increment is thread safe",
//!     RunsInThreads::with_threads(&counter, 20)?,
//!     Matches::labeled("increment", increment),
//! )
//! .affirm()
//! .unwrap();
//!
//! assert_eq!(counter.load(Ordering::SeqCst), 20);
//! # Ok::<(), affirm::Error>(())
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Matcher`] | Predicate with expectation and mismatch descriptions |
//! | [`Assertion`] | Reason, one-shot producer and matcher |
//! | [`AssertAll`] | Group of assertions reporting every failure |
//! | [`AssertWith`] | Assertion built from a value on demand |
//! | [`FutureAssertion`] | Assertion over a future, awaited under a deadline |
//! | [`RunsInThreads`] | Runs a candidate from N threads released together |
//! | [`MatchesBefore`] | Fails a wrapped matcher that misses its deadline |
//! | [`Outcome`] | Pass, mismatch, timeout or unexpected error |
//! | [`Verdict`] | A matcher's answer, telling a timeout from a mismatch |
//! | [`Config`] | Worker pool settings for [`RunsInThreads`] |
//!
//! Ready-made predicates live in [`matchers`].
//!
//! ## Logging
//!
//! The crate logs through [`tracing`](https://docs.rs/tracing) and never
//! installs a subscriber. Harness tallies and refuted assertions are logged at
//! `debug`, missed deadlines at `warn`.
//!
//! ## Features
//!
//! - **`serde`** - `Serialize`/`Deserialize` for [`Config`] and [`Refutation`]
//!
//! ## Examples
//!
//! - `counter.rs` - Compares a synchronized and an unsynchronized counter

mod assert;
mod assert_all;
mod assert_with;
mod assertion;
mod config;
mod description;
mod error;
mod future_assertion;
mod matcher;
mod matches_before;
mod outcome;
mod runs_in_threads;

pub mod matchers;

pub use assert::Assert;
pub use assert_all::AssertAll;
pub use assert_with::AssertWith;
pub use assertion::Assertion;
pub use config::Config;
pub use description::Description;
pub use error::{AffirmError, Error, Failures};
pub use future_assertion::{DEFAULT_TIMEOUT, FutureAssertion};
pub use matcher::Matcher;
pub use matches_before::MatchesBefore;
pub use outcome::{Outcome, Refutation, Verdict};
pub use runs_in_threads::RunsInThreads;

/// Convenience alias for `Result<T, affirm::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;
