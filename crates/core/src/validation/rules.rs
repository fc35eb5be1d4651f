//! Reusable rule constructors for [`ValidationGate`](super::ValidationGate).

use validator::Validate;

use super::Rule;
use crate::types::DbId;

/// Run the `validator` derive checks (length and range bounds) declared on
/// the transfer type.
///
/// Violations are flattened to `"field: message"` strings, sorted by field
/// name so the combined message is stable.
pub fn field_bounds<T: Validate + 'static>() -> Rule<T> {
    Box::new(|value: &T| {
        let Err(errors) = value.validate() else {
            return Ok(());
        };

        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{field}: {message}"),
                    None => format!("{field}: {}", e.code),
                })
            })
            .collect();
        messages.sort();
        Err(messages.join(", "))
    })
}

/// The field must be present (and, for text, not blank).
pub fn required_text<T: 'static>(field: &'static str, get: fn(&T) -> Option<&str>) -> Rule<T> {
    Box::new(move |value: &T| match get(value) {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err(format!("{field} is required")),
    })
}

/// The field, when present, may contain only letters and inner spaces.
pub fn letters_only<T: 'static>(field: &'static str, get: fn(&T) -> Option<&str>) -> Rule<T> {
    Box::new(move |value: &T| match get(value) {
        Some(text)
            if !text.chars().all(|c| c.is_alphabetic() || c == ' ')
                || text.starts_with(' ')
                || text.ends_with(' ') =>
        {
            Err(format!("{field} may contain only letters"))
        }
        _ => Ok(()),
    })
}

/// The id field must be present and a positive integer.
///
/// Used both for the entity's own id on update and for foreign keys. Whether
/// the referenced row exists is left to the store.
pub fn positive_id<T: 'static>(field: &'static str, get: fn(&T) -> Option<DbId>) -> Rule<T> {
    Box::new(move |value: &T| match get(value) {
        Some(id) if id > 0 => Ok(()),
        Some(_) => Err(format!("{field} must be a positive number")),
        None => Err(format!("{field} is required")),
    })
}

/// The numeric field must be present and not negative.
pub fn non_negative<T: 'static>(field: &'static str, get: fn(&T) -> Option<f64>) -> Rule<T> {
    Box::new(move |value: &T| match get(value) {
        Some(n) if n >= 0.0 => Ok(()),
        Some(_) => Err(format!("{field} must be equal to or greater than zero")),
        None => Err(format!("{field} is required")),
    })
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::*;

    #[derive(Debug, Default, Validate)]
    struct Draft {
        id: Option<DbId>,
        #[validate(length(min = 1, max = 30, message = "must be between 1 and 30 characters"))]
        title: Option<String>,
        amount: Option<f64>,
    }

    fn check(rule: &Rule<Draft>, draft: &Draft) -> Result<(), String> {
        rule(draft)
    }

    #[test]
    fn field_bounds_reports_length_violation() {
        let rule = field_bounds::<Draft>();
        let draft = Draft {
            title: Some("x".repeat(31)),
            ..Default::default()
        };
        assert_eq!(
            check(&rule, &draft),
            Err("title: must be between 1 and 30 characters".to_string())
        );
        assert!(check(&rule, &Draft::default()).is_ok());
    }

    #[test]
    fn required_text_rejects_missing_and_blank() {
        let rule = required_text::<Draft>("title", |d| d.title.as_deref());
        assert!(check(&rule, &Draft::default()).is_err());
        let blank = Draft {
            title: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(check(&rule, &blank), Err("title is required".to_string()));
    }

    #[test]
    fn letters_only_accepts_words_and_rejects_digits() {
        let rule = letters_only::<Draft>("title", |d| d.title.as_deref());
        let ok = Draft {
            title: Some("Whole milk".into()),
            ..Default::default()
        };
        let bad = Draft {
            title: Some("Milk 2".into()),
            ..Default::default()
        };
        assert!(check(&rule, &ok).is_ok());
        assert!(check(&rule, &bad).is_err());
        assert!(check(&rule, &Draft::default()).is_ok());
    }

    #[test]
    fn positive_id_distinguishes_missing_and_non_positive() {
        let rule = positive_id::<Draft>("id", |d| d.id);
        assert_eq!(
            check(&rule, &Draft::default()),
            Err("id is required".to_string())
        );
        let zero = Draft {
            id: Some(0),
            ..Default::default()
        };
        assert_eq!(
            check(&rule, &zero),
            Err("id must be a positive number".to_string())
        );
    }

    #[test]
    fn non_negative_accepts_zero() {
        let rule = non_negative::<Draft>("quality", |d| d.amount);
        let zero = Draft {
            amount: Some(0.0),
            ..Default::default()
        };
        let negative = Draft {
            amount: Some(-0.1),
            ..Default::default()
        };
        assert!(check(&rule, &zero).is_ok());
        assert!(check(&rule, &negative).is_err());
    }
}
