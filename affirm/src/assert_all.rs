use std::{convert::Infallible, fmt};

use crate::{AffirmError, Assert, error::Failures};

/// Affirms every assertion in a group and reports all failures together.
///
/// Unlike a chain of `?`, a failing assertion does not stop the rest: each one
/// is evaluated in order, and the group fails with
/// [`AffirmError::All`] listing every failure, fatal ones included. The
/// group description numbers its members:
///
/// ```text
/// <description>: 1) <first reason>, 2) <second reason>
/// ```
///
/// # Example
///
/// ```rust
/// use affirm::{AssertAll, Assertion, matchers::IsEqual};
///
/// let err = AssertAll::new("arithmetic")
///     .and(Assertion::value("sum", 2 + 2, IsEqual::new(4)))
///     .and(Assertion::value("product", 2 * 3, IsEqual::new(5)))
///     .and(Assertion::value("difference", 5 - 3, IsEqual::new(1)))
///     .affirm()
///     .unwrap_err();
///
/// assert!(err.to_string().starts_with("arithmetic: 1) sum, 2) product, 3) difference"));
/// assert_eq!(err.failures().map(<[_]>::len), Some(2));
/// ```
pub struct AssertAll<'a, E = Infallible> {
    description: String,
    assertions: Vec<Box<dyn Assert<Error = E> + 'a>>,
}

impl<E> fmt::Debug for AssertAll<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssertAll")
            .field("description", &self.description)
            .field("assertions", &self.assertions.len())
            .finish()
    }
}

impl<'a, E> AssertAll<'a, E> {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            assertions: Vec::new(),
        }
    }

    /// Adds an assertion to the group.
    pub fn and(mut self, assertion: impl Assert<Error = E> + 'a) -> Self {
        self.assertions.push(Box::new(assertion));
        self
    }

    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }

    /// The group description followed by its numbered members.
    pub fn description(&self) -> String {
        let members = self
            .assertions
            .iter()
            .enumerate()
            .map(|(i, assertion)| format!("{}) {}", i + 1, assertion.description()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}: {members}", self.description)
    }

    /// Evaluates every assertion.
    ///
    /// # Errors
    ///
    /// [`AffirmError::All`] with one entry per failed assertion, in the order
    /// they were added.
    pub fn affirm(self) -> Result<(), AffirmError<E>> {
        let description = self.description();
        let total = self.assertions.len();
        let failures: Vec<_> = self
            .assertions
            .into_iter()
            .filter_map(|assertion| assertion.affirm().err())
            .collect();

        if failures.is_empty() {
            return Ok(());
        }
        tracing::debug!(
            description = %description,
            total,
            failed = failures.len(),
            "assertion group refuted"
        );
        Err(AffirmError::All {
            description,
            failures: Failures::new(failures),
        })
    }
}

impl<E> Assert for AssertAll<'_, E> {
    type Error = E;

    fn description(&self) -> String {
        AssertAll::description(self)
    }

    fn affirm(self: Box<Self>) -> Result<(), AffirmError<E>> {
        AssertAll::affirm(*self)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{
        Assertion,
        matchers::{IsEqual, TextIs},
    };

    #[derive(Debug, PartialEq, Eq, thiserror::Error)]
    #[error("{0}")]
    struct Broken(&'static str);

    #[test]
    fn passes_when_every_assertion_holds() {
        let group = AssertAll::new("all good")
            .and(Assertion::value("one", 1, IsEqual::new(1)))
            .and(Assertion::value("text", "a", TextIs::new("a")));
        assert_eq!(group.len(), 2);
        assert_eq!(group.affirm(), Ok(()));
    }

    #[test]
    fn numbers_members_in_description() {
        let group = AssertAll::new("checks")
            .and(Assertion::value("first", true, IsEqual::new(true)))
            .and(Assertion::value("second", 2, IsEqual::new(2)));
        assert_eq!(group.description(), "checks: 1) first, 2) second");
    }

    #[test]
    fn reports_every_failure_not_just_the_first() {
        let evaluated = Cell::new(0);
        let counted = |value: i32| {
            evaluated.set(evaluated.get() + 1);
            Ok::<_, Infallible>(value)
        };

        let err = AssertAll::new("numbers")
            .and(Assertion::new("a", || counted(1), IsEqual::new(2)))
            .and(Assertion::new("b", || counted(3), IsEqual::new(3)))
            .and(Assertion::new("c", || counted(4), IsEqual::new(5)))
            .affirm()
            .unwrap_err();

        assert_eq!(evaluated.get(), 3);
        let failures = err.failures().unwrap();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].refutation().unwrap().reason(), "a");
        assert_eq!(failures[1].refutation().unwrap().reason(), "c");
        assert_eq!(
            err.to_string(),
            "numbers: 1) a, 2) b, 3) c\n\n\
             a\nExpected: <2>\n but was: was <1>\n\n\
             c\nExpected: <5>\n but was: was <4>"
        );
    }

    #[test]
    fn collects_fatal_errors_unchanged() {
        let err = AssertAll::new("loading")
            .and(Assertion::new(
                "config",
                || Err::<String, _>(Broken("missing")),
                TextIs::new("x"),
            ))
            .and(Assertion::new(
                "data",
                || Ok::<_, Broken>("x".to_string()),
                TextIs::new("x"),
            ))
            .affirm()
            .unwrap_err();

        let failures = err.failures().unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0], AffirmError::Fatal(Broken("missing")));
    }

    #[test]
    fn groups_nest() {
        let inner = AssertAll::new("inner").and(Assertion::value("x", 1, IsEqual::new(0)));
        let err = AssertAll::new("outer")
            .and(inner)
            .and(Assertion::value("y", 1, IsEqual::new(1)))
            .affirm()
            .unwrap_err();

        let failures = err.failures().unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].failures().map(<[_]>::len), Some(1));
        assert!(err.to_string().starts_with("outer: 1) inner: 1) x, 2) y"));
    }

    #[test]
    fn empty_group_passes() {
        let group: AssertAll<'_> = AssertAll::new("nothing");
        assert!(group.is_empty());
        assert_eq!(group.description(), "nothing: ");
        assert_eq!(group.affirm(), Ok(()));
    }
}
