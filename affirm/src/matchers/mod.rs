//! Predicate matchers built on the [`Matcher`](crate::Matcher) contract.
//!
//! These are small value types. They compose by holding other matchers, so a
//! check can be as simple as [`IsTrue`] or wrap others like [`Not`],
//! [`AllOf`] and [`Satisfies`].
//!
//! # Example
//!
//! ```rust
//! use affirm::{Assertion, matchers::{AllOf, EndsWith, StartsWith}};
//!
//! Assertion::value(
//!     "greeting is framed",
//!     "hello, world",
//!     AllOf::new()
//!         .and(StartsWith::new("hello"))
//!         .and(EndsWith::new("world")),
//! )
//! .affirm()
//! .unwrap();
//! ```
//!
//! Matchers that test other matchers, [`Matches`] and [`Mismatches`], make
//! it possible to pin down the exact failure text a matcher produces.

mod all_of;
mod is_equal;
mod is_true;
mod matcher_of;
mod matches;
mod mismatches;
mod not;
mod satisfies;
mod text;
mod throws;

pub use all_of::AllOf;
pub use is_equal::IsEqual;
pub use is_true::IsTrue;
pub use matcher_of::MatcherOf;
pub use matches::Matches;
pub use mismatches::Mismatches;
pub use not::Not;
pub use satisfies::Satisfies;
pub use text::{EndsWith, HasString, MatchesRegex, StartsWith, TextIs};
pub use throws::Throws;
