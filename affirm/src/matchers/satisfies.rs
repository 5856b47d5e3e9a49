use std::{fmt, marker::PhantomData};

use crate::{Description, Matcher, matchers::IsTrue};

/// Matches when a feature extracted from the value satisfies another matcher.
///
/// ```rust
/// use affirm::{Matcher, matchers::{IsEqual, Satisfies}};
///
/// let three_chars = Satisfies::labeled("length", |s: &str| s.len(), IsEqual::new(3));
/// assert!(three_chars.matches("abc"));
/// assert_eq!(Matcher::<str>::expectation(&three_chars), "length satisfies <3>");
/// assert_eq!(three_chars.mismatch("abcd"), "length was <4>");
/// ```
pub struct Satisfies<F, M, U> {
    feature: String,
    extract: F,
    inner: M,
    _marker: PhantomData<fn() -> U>,
}

impl<F, M, U> fmt::Debug for Satisfies<F, M, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Satisfies")
            .field("feature", &self.feature)
            .finish_non_exhaustive()
    }
}

impl<F, M, U> Satisfies<F, M, U> {
    /// Checks `extract(value)` against `inner`, describing it as "feature".
    pub fn new(extract: F, inner: M) -> Self {
        Self::labeled("feature", extract, inner)
    }

    /// Like [`new`](Self::new), with a name for the extracted feature.
    pub fn labeled(feature: impl Into<String>, extract: F, inner: M) -> Self {
        Self {
            feature: feature.into(),
            extract,
            inner,
            _marker: PhantomData,
        }
    }
}

impl<F> Satisfies<F, IsTrue, bool> {
    /// Matches values for which `func` returns `true`.
    pub fn func(func: F) -> Self {
        Self::labeled("func application", func, IsTrue)
    }
}

impl<T, F, M, U> Matcher<T> for Satisfies<F, M, U>
where
    T: ?Sized,
    F: Fn(&T) -> U,
    M: Matcher<U>,
{
    fn matches(&self, actual: &T) -> bool {
        self.inner.matches(&(self.extract)(actual))
    }

    fn describe_to(&self, desc: &mut Description) {
        desc.append_text(&self.feature)
            .append_text(" satisfies ")
            .append_description_of::<U, M>(&self.inner);
    }

    fn describe_mismatch(&self, actual: &T, desc: &mut Description) {
        desc.append_text(&self.feature).append_text(" ");
        self.inner.describe_mismatch(&(self.extract)(actual), desc);
    }

    fn evaluate(&self, actual: &T, mismatch: &mut Description) -> bool {
        let feature = (self.extract)(actual);
        let mut inner = Description::new();
        if self.inner.evaluate(&feature, &mut inner) {
            return true;
        }
        mismatch
            .append_text(&self.feature)
            .append_text(" ")
            .append_text(inner.as_str());
        false
    }
}
