use crate::{Description, Matcher};

/// Matches `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IsTrue;

impl Matcher<bool> for IsTrue {
    fn matches(&self, actual: &bool) -> bool {
        *actual
    }

    fn describe_to(&self, desc: &mut Description) {
        desc.append_text("is ").append_value(&true);
    }

    fn describe_mismatch(&self, actual: &bool, desc: &mut Description) {
        desc.append_text("was ").append_value(actual);
    }
}
