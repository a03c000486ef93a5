//! Declarative field validation.
//!
//! Input types describe themselves as an ordered list of [`FieldRule`]s. Rules
//! are evaluated left to right and the first violation is reported as a
//! `ValidationFailed` error naming the field; later rules are not evaluated.

use crate::error::{DomainError, DomainResult};

/// A single predicate over one field value.
#[derive(Debug, Clone, Copy)]
pub enum Check<'a> {
    /// Present and not only whitespace.
    NotBlank(&'a str),
    /// Looks like `local@domain`.
    Email(&'a str),
    /// At least this many characters.
    MinChars(&'a str, usize),
    /// An optional value was supplied.
    Present(bool),
    /// Arbitrary precomputed condition.
    Holds(bool),
}

impl Check<'_> {
    fn passes(&self) -> bool {
        match *self {
            Check::NotBlank(v) => !v.trim().is_empty(),
            Check::Email(v) => is_email(v),
            Check::MinChars(v, min) => v.chars().count() >= min,
            Check::Present(p) | Check::Holds(p) => p,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule<'a> {
    pub field: &'static str,
    pub check: Check<'a>,
    pub message: &'static str,
}

impl<'a> FieldRule<'a> {
    pub fn new(field: &'static str, check: Check<'a>, message: &'static str) -> Self {
        Self {
            field,
            check,
            message,
        }
    }
}

pub trait Validate {
    /// Rules in priority order.
    fn rules(&self) -> Vec<FieldRule<'_>>;

    fn validate(&self) -> DomainResult<()> {
        match self.rules().into_iter().find(|r| !r.check.passes()) {
            Some(rule) => Err(DomainError::validation(rule.field, rule.message)),
            None => Ok(()),
        }
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    struct Form {
        email: String,
        password: String,
    }

    impl Validate for Form {
        fn rules(&self) -> Vec<FieldRule<'_>> {
            vec![
                FieldRule::new("email", Check::NotBlank(&self.email), "must not be blank"),
                FieldRule::new("email", Check::Email(&self.email), "must be a valid email"),
                FieldRule::new("password", Check::MinChars(&self.password, 8), "must be at least 8 characters"),
            ]
        }
    }

    #[test]
    fn first_violation_wins() {
        let form = Form {
            email: "   ".to_string(),
            password: "short".to_string(),
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert_eq!(err.message(), "email: must not be blank");
    }

    #[test]
    fn later_rules_checked_when_earlier_pass() {
        let form = Form {
            email: "a@x.com".to_string(),
            password: "short".to_string(),
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err.message(), "password: must be at least 8 characters");
    }

    #[test]
    fn valid_form_passes() {
        let form = Form {
            email: "a@x.com".to_string(),
            password: "password1".to_string(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn email_shapes() {
        assert!(is_email("a@x.com"));
        assert!(is_email("a@localhost"));
        assert!(!is_email("ax.com"));
        assert!(!is_email("@x.com"));
        assert!(!is_email("a@"));
        assert!(!is_email("a@b@c"));
        assert!(!is_email("a b@x.com"));
    }
}
