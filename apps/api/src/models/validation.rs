//! Field constraints for incoming records: required strings and length limits.

use crate::errors::{AppError, FieldError};

/// Collects field-level violations so a caller sees every problem at once.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects empty or whitespace-only values.
    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.push(field, format!("{field} is required"));
        }
        self
    }

    /// Length limit counted in characters, not bytes.
    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        if value.chars().count() > max {
            self.push(field, format!("{field} must be at most {max} characters"));
        }
        self
    }

    pub fn max_len_opt(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        match value {
            Some(v) => self.max_len(field, v, max),
            None => self,
        }
    }

    pub fn push(&mut self, field: &str, message: String) {
        self.0.push(FieldError {
            field: field.to_string(),
            message,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidFields(self.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_rejects_blank() {
        let mut errors = FieldErrors::new();
        errors.required("name", "   ");
        match errors.into_result() {
            Err(AppError::InvalidFields(fields)) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "name");
            }
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }

    #[test]
    fn test_max_len_counts_chars() {
        let mut errors = FieldErrors::new();
        // 200 multi-byte chars is still within a 200 char limit
        errors.max_len("name", &"é".repeat(200), 200);
        assert!(errors.is_empty());
        errors.max_len("name", &"a".repeat(201), 200);
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_collects_every_violation() {
        let mut errors = FieldErrors::new();
        errors
            .required("title", "")
            .max_len_opt("description", Some(&"x".repeat(2001)), 2000)
            .max_len_opt("codeLanguage", None, 50);
        match errors.into_result() {
            Err(AppError::InvalidFields(fields)) => assert_eq!(fields.len(), 2),
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }
}
