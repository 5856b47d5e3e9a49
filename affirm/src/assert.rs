use crate::{AffirmError, Assertion};

/// Anything that can be affirmed once and described beforehand.
///
/// [`Assertion`] is the basic implementation. [`AssertAll`](crate::AssertAll)
/// and [`AssertWith`](crate::AssertWith) build on it, and since they implement
/// `Assert` too, groups nest. The trait is object safe, so a group can hold
/// assertions over different value types side by side.
pub trait Assert {
    /// The producer error a fatal failure carries.
    type Error;

    /// Short text naming what is being affirmed.
    fn description(&self) -> String;

    /// Evaluates the assertion, consuming it.
    fn affirm(self: Box<Self>) -> Result<(), AffirmError<Self::Error>>;
}

impl<T, E> Assert for Assertion<'_, T, E> {
    type Error = E;

    fn description(&self) -> String {
        self.reason().to_string()
    }

    fn affirm(self: Box<Self>) -> Result<(), AffirmError<E>> {
        Assertion::affirm(*self)
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use super::*;
    use crate::matchers::IsEqual;

    #[test]
    fn boxed_assertion_keeps_its_reason() {
        let boxed: Box<dyn Assert<Error = Infallible>> =
            Box::new(Assertion::value("one is one", 1, IsEqual::new(1)));
        assert_eq!(boxed.description(), "one is one");
        assert_eq!(boxed.affirm(), Ok(()));
    }
}
