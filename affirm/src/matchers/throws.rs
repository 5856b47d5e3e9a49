use std::{any, fmt};

use crate::{Description, Matcher, matchers::TextIs};

/// Short name of `E`, without its module path.
fn error_type_name<E>() -> &'static str {
    let full = any::type_name::<E>();
    let path = &full[..full.find('<').unwrap_or(full.len())];
    match path.rfind("::") {
        Some(i) => &full[i + 2..],
        None => full,
    }
}

/// Matches a `Result` holding an error whose message satisfies a matcher.
///
/// Use it with [`Assertion::expecting_error`](crate::Assertion::expecting_error)
/// to declare that a failure is the expected outcome.
///
/// ```rust
/// use affirm::{Assertion, matchers::Throws};
///
/// let parse = || "x".parse::<u8>();
/// Assertion::expecting_error(
///     "rejects letters",
///     parse,
///     Throws::message("invalid digit found in string"),
/// )
/// .affirm()
/// .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct Throws<M> {
    message: M,
}

impl<M> Throws<M> {
    pub fn new(message: M) -> Self {
        Self { message }
    }
}

impl Throws<TextIs> {
    /// Expects an error whose message is exactly `message`.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(TextIs::new(message))
    }
}

impl<T, E, M> Matcher<Result<T, E>> for Throws<M>
where
    E: fmt::Display,
    M: Matcher<String>,
{
    fn matches(&self, actual: &Result<T, E>) -> bool {
        match actual {
            Ok(_) => false,
            Err(e) => self.message.matches(&e.to_string()),
        }
    }

    fn describe_to(&self, desc: &mut Description) {
        desc.append_text("Error has type '")
            .append_text(error_type_name::<E>())
            .append_text("' and message matches ")
            .append_description_of::<String, M>(&self.message);
    }

    fn describe_mismatch(&self, actual: &Result<T, E>, desc: &mut Description) {
        match actual {
            Ok(_) => {
                desc.append_text("The error wasn't raised.");
            }
            Err(e) => {
                desc.append_text("Error has type '")
                    .append_text(error_type_name::<E>())
                    .append_text("' and message '")
                    .append_text(e.to_string())
                    .append_text("'");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::StartsWith;

    #[derive(Debug, thiserror::Error)]
    #[error("{0}")]
    struct Rejected(String);

    #[test]
    fn matches_error_message() {
        let matcher = Throws::message("illegal arg");
        assert!(matcher.matches(&Err::<(), _>(Rejected("illegal arg".into()))));
        assert!(!matcher.matches(&Err::<(), _>(Rejected("other".into()))));
        assert!(!matcher.matches(&Ok::<_, Rejected>(1)));
    }

    #[test]
    fn describes_expected_error() {
        let matcher = Throws::new(StartsWith::new("illegal"));
        assert_eq!(
            Matcher::<Result<(), Rejected>>::expectation(&matcher),
            "Error has type 'Rejected' and message matches Text starting with \"illegal\""
        );
    }

    #[test]
    fn describes_wrong_message() {
        let matcher = Throws::message("illegal arg");
        assert_eq!(
            matcher.mismatch(&Err::<(), _>(Rejected("boom".into()))),
            "Error has type 'Rejected' and message 'boom'"
        );
        assert_eq!(
            matcher.mismatch(&Ok::<_, Rejected>(())),
            "The error wasn't raised."
        );
    }

    #[test]
    fn type_name_drops_module_path() {
        assert_eq!(error_type_name::<std::num::ParseIntError>(), "ParseIntError");
        assert_eq!(error_type_name::<Rejected>(), "Rejected");
    }
}
