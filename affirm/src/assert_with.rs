use std::fmt;

use crate::{AffirmError, Assert};

/// Builds an assertion from a value when it is needed.
///
/// Handy for table-driven tests, where the same check is stamped out for
/// every row. `func` runs each time the assertion is described or affirmed,
/// on a clone of the value for [`description`](Assert::description).
///
/// ```rust
/// use affirm::{AssertAll, AssertWith, Assertion, matchers::IsEqual};
///
/// let doubled = |n: u32| Assertion::value(format!("{n} doubled"), n * 2, IsEqual::new(n + n));
/// let mut group = AssertAll::new("doubling");
/// for n in [1, 2, 3] {
///     group = group.and(AssertWith::new(n, doubled));
/// }
/// assert_eq!(group.description(), "doubling: 1) 1 doubled, 2) 2 doubled, 3) 3 doubled");
/// group.affirm().unwrap();
/// ```
pub struct AssertWith<T, F> {
    value: T,
    func: F,
}

impl<T: fmt::Debug, F> fmt::Debug for AssertWith<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssertWith")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl<T, F> AssertWith<T, F> {
    pub fn new(value: T, func: F) -> Self {
        Self { value, func }
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T, F, A> AssertWith<T, F>
where
    F: Fn(T) -> A,
    A: Assert,
{
    /// Builds the assertion and evaluates it.
    pub fn affirm(self) -> Result<(), AffirmError<A::Error>> {
        Box::new((self.func)(self.value)).affirm()
    }
}

impl<T, F, A> Assert for AssertWith<T, F>
where
    T: Clone,
    F: Fn(T) -> A,
    A: Assert,
{
    type Error = A::Error;

    fn description(&self) -> String {
        (self.func)(self.value.clone()).description()
    }

    fn affirm(self: Box<Self>) -> Result<(), AffirmError<A::Error>> {
        AssertWith::affirm(*self)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{Assertion, matchers::TextIs};

    #[test]
    fn builds_assertion_from_value() {
        let greeting = AssertWith::new("hello".to_string(), |text: String| {
            Assertion::value("greets", text, TextIs::new("hello"))
        });
        assert_eq!(greeting.value(), "hello");
        assert_eq!(Assert::description(&greeting), "greets");
        greeting.affirm().unwrap();
    }

    #[test]
    fn failure_comes_from_the_built_assertion() {
        let err = AssertWith::new("bye", |text: &'static str| {
            Assertion::value("greets", text, TextIs::new("hello"))
        })
        .affirm()
        .unwrap_err();
        assert_eq!(err.refutation().unwrap().actual(), "Text is \"bye\"");
    }

    #[test]
    fn builds_lazily() {
        let built = Cell::new(0);
        let check = AssertWith::new(1, |n: i32| {
            built.set(built.get() + 1);
            Assertion::value("one", n, crate::matchers::IsEqual::new(1))
        });
        assert_eq!(built.get(), 0);
        check.affirm().unwrap();
        assert_eq!(built.get(), 1);
    }
}
