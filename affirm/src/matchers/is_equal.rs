use std::fmt;

use crate::{Description, Matcher};

/// Matches values equal to the expected one.
///
/// ```rust
/// use affirm::{Matcher, matchers::IsEqual};
///
/// let matcher = IsEqual::new(2000);
/// assert!(matcher.matches(&2000));
/// assert_eq!(matcher.mismatch(&1999), "was <1999>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IsEqual<V> {
    expected: V,
}

impl<V> IsEqual<V> {
    pub fn new(expected: V) -> Self {
        Self { expected }
    }
}

impl<T, V> Matcher<T> for IsEqual<V>
where
    T: PartialEq<V> + fmt::Debug + ?Sized,
    V: fmt::Debug,
{
    fn matches(&self, actual: &T) -> bool {
        *actual == self.expected
    }

    fn describe_to(&self, desc: &mut Description) {
        desc.append_value(&self.expected);
    }

    fn describe_mismatch(&self, actual: &T, desc: &mut Description) {
        desc.append_text("was ").append_value(actual);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_across_comparable_types() {
        let matcher = IsEqual::new("abc");
        assert!(matcher.matches(&String::from("abc")));
        assert_eq!(Matcher::<String>::expectation(&matcher), "<\"abc\">");
    }

    #[test]
    fn mismatch_shows_actual_value() {
        let matcher = IsEqual::new(3);
        assert!(!matcher.matches(&4));
        assert_eq!(matcher.mismatch(&4), "was <4>");
    }
}
