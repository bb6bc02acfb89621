/// Deterministic first-error derivation
///
/// `validator` collects field errors into a HashMap, whose iteration
/// order varies between runs. The contract surfaces exactly one message:
/// the first rule failure of the first failing field in declaration
/// order. Each request type therefore declares its field order and this
/// helper walks it.

use validator::ValidationErrors;

/// Picks the surfaced message from a set of validation errors
///
/// Fields are visited in the order given; within a field, rules keep
/// the order they were evaluated in. Falls back to a generic message if
/// a rule carries no message attribute (none of ours do).
pub fn first_error(errors: &ValidationErrors, field_order: &[&str]) -> String {
    let field_errors = errors.field_errors();

    for &field in field_order {
        if let Some(list) = field_errors.get(field) {
            if let Some(error) = list.first() {
                return error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("The {} field is invalid", field));
            }
        }
    }

    "The given data was invalid".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Form {
        #[validate(length(min = 1, message = "The name field is required"))]
        name: String,

        #[validate(email(message = "The email must be a valid email address"))]
        email: String,

        #[validate(length(min = 7, message = "The password must be at least 7 characters"))]
        password: String,
    }

    #[test]
    fn test_first_error_follows_declaration_order() {
        // All three fields invalid; name must win
        let form = Form {
            name: String::new(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };

        let errors = form.validate().unwrap_err();
        let message = first_error(&errors, &["name", "email", "password"]);
        assert_eq!(message, "The name field is required");
    }

    #[test]
    fn test_first_error_skips_valid_fields() {
        let form = Form {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            password: "short".to_string(),
        };

        let errors = form.validate().unwrap_err();
        let message = first_error(&errors, &["name", "email", "password"]);
        assert_eq!(message, "The password must be at least 7 characters");
    }

    #[test]
    fn test_first_error_is_stable_across_runs() {
        let form = Form {
            name: String::new(),
            email: "nope".to_string(),
            password: "x".to_string(),
        };

        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            let errors = form.validate().unwrap_err();
            seen.insert(first_error(&errors, &["name", "email", "password"]));
        }

        assert_eq!(seen.len(), 1, "message must not depend on map order");
    }
}
