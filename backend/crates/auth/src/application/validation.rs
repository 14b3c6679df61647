//! Input validation helpers shared by the use cases

use kernel::error::app_error::AppResult;

use crate::error::AuthError;

/// Collects every violated rule instead of stopping at the first one
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<String>);

impl Violations {
    /// Keep the value, or record the rule it broke
    pub(crate) fn check<T>(&mut self, result: AppResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push(e.message().to_owned());
                None
            }
        }
    }

    pub(crate) fn into_error(self) -> AuthError {
        AuthError::Validation(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::app_error::AppError;

    #[test]
    fn test_collects_all_messages_in_order() {
        let mut violations = Violations::default();
        assert_eq!(violations.check(Ok::<_, AppError>(1)), Some(1));
        assert_eq!(violations.check::<()>(Err(AppError::bad_request("a"))), None);
        assert_eq!(violations.check::<()>(Err(AppError::bad_request("b"))), None);

        match violations.into_error() {
            AuthError::Validation(rules) => assert_eq!(rules, vec!["a", "b"]),
            other => panic!("unexpected {other:?}"),
        }
    }
}
