use std::fmt;

use crate::{Description, Matcher};

/// Inverts another matcher.
#[derive(Debug, Clone)]
pub struct Not<M> {
    inner: M,
}

impl<M> Not<M> {
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

impl<T, M> Matcher<T> for Not<M>
where
    T: fmt::Debug + ?Sized,
    M: Matcher<T>,
{
    fn matches(&self, actual: &T) -> bool {
        !self.inner.matches(actual)
    }

    fn describe_to(&self, desc: &mut Description) {
        desc.append_text("not ")
            .append_description_of::<T, M>(&self.inner);
    }

    fn describe_mismatch(&self, actual: &T, desc: &mut Description) {
        desc.append_text("was ").append_value(actual);
    }
}
