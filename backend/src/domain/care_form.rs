//! Binding of submitted care forms onto a [`Care`] and validation of the
//! result.
//!
//! Reading collects the whitelisted form fields (`date`, `description`) from
//! the submitted body. Binding copies them onto the care record and records
//! conversion failures. Validation then checks
//! the declared constraints of the bound record. Both report into the same
//! [`BindingResult`].

use shared::{parse_iso_date, Care, CareForm, FieldError, MAX_DESCRIPTION_LENGTH};

/// Accumulated binding and validation errors for one submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingResult {
    errors: Vec<FieldError>,
}

impl BindingResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_value(&mut self, field: &str, code: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, code, message));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_field_errors(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

/// Collect the whitelisted fields of a submitted form body.
///
/// Unknown fields, `id` included, are dropped. A field submitted more than
/// once keeps its first value and is rejected.
pub fn read_care_form(fields: &[(String, String)]) -> (CareForm, BindingResult) {
    let mut form = CareForm::default();
    let mut result = BindingResult::new();

    for (name, value) in fields {
        let slot = match name.as_str() {
            "date" => &mut form.date,
            "description" => &mut form.description,
            _ => continue,
        };

        if slot.is_none() {
            *slot = Some(value.clone());
        } else if !result.has_field_errors(name) {
            result.reject_value(name, "duplicate", "must be submitted only once");
        }
    }

    (form, result)
}

/// Copy form fields onto `care`. The care's ID and pet are never touched.
///
/// An absent or empty date keeps the care's current date.
pub fn bind_care_form(care: &mut Care, form: &CareForm, result: &mut BindingResult) {
    if let Some(raw) = form.date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        match parse_iso_date(raw) {
            Ok(date) => care.date = date,
            Err(e) => result.reject_value("date", "typeMismatch", e.to_string()),
        }
    }

    if let Some(description) = &form.description {
        care.description = description.clone();
    }
}

/// Check the declared constraints of a bound care record
pub fn validate_care(care: &Care, result: &mut BindingResult) {
    if care.description.trim().is_empty() {
        result.reject_value("description", "NotBlank", "must not be blank");
    } else if care.description.chars().count() > MAX_DESCRIPTION_LENGTH {
        result.reject_value(
            "description",
            "Size",
            format!("size must be between 1 and {}", MAX_DESCRIPTION_LENGTH),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn form(date: Option<&str>, description: Option<&str>) -> CareForm {
        CareForm {
            date: date.map(str::to_string),
            description: description.map(str::to_string),
        }
    }

    fn bind_and_validate(care: &mut Care, form: &CareForm) -> BindingResult {
        let mut result = BindingResult::new();
        bind_care_form(care, form, &mut result);
        validate_care(care, &mut result);
        result
    }

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_valid_form_binds_all_fields() {
        let mut care = Care::new();
        let result = bind_and_validate(&mut care, &form(Some("2024-04-01"), Some("dental cleaning")));

        assert!(!result.has_errors());
        assert_eq!(care.date, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(care.description, "dental cleaning");
        assert!(care.is_new());
    }

    #[test]
    fn test_missing_date_keeps_default() {
        let mut care = Care::new();
        let today = care.date;

        let result = bind_and_validate(&mut care, &form(None, Some("walk")));
        assert!(!result.has_errors());
        assert_eq!(care.date, today);

        let result = bind_and_validate(&mut care, &form(Some("  "), Some("walk")));
        assert!(!result.has_errors());
        assert_eq!(care.date, today);
    }

    #[test]
    fn test_malformed_date_is_a_type_mismatch() {
        let mut care = Care::new();
        let result = bind_and_validate(&mut care, &form(Some("04/01/2024"), Some("walk")));

        assert!(result.has_field_errors("date"));
        assert!(!result.has_field_errors("description"));
        assert_eq!(result.errors()[0].code, "typeMismatch");
    }

    #[test]
    fn test_blank_description_is_rejected() {
        for description in [None, Some(""), Some("   ")] {
            let mut care = Care::new();
            let result = bind_and_validate(&mut care, &form(Some("2024-04-01"), description));
            assert_eq!(
                result.into_errors(),
                vec![FieldError::new("description", "NotBlank", "must not be blank")]
            );
        }
    }

    #[test]
    fn test_overlong_description_is_rejected() {
        let mut care = Care::new();
        let long = "a".repeat(MAX_DESCRIPTION_LENGTH + 1);
        let result = bind_and_validate(&mut care, &form(None, Some(&long)));
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()[0].code, "Size");

        let mut care = Care::new();
        let exact = "a".repeat(MAX_DESCRIPTION_LENGTH);
        assert!(!bind_and_validate(&mut care, &form(None, Some(&exact))).has_errors());
    }

    #[test]
    fn test_binding_never_touches_identity() {
        let mut care = Care::new();
        care.pet_id = Some(5);
        bind_and_validate(&mut care, &form(Some("2024-04-01"), Some("bath")));
        assert_eq!(care.id, None);
        assert_eq!(care.pet_id, Some(5));
    }

    #[test]
    fn test_errors_accumulate_across_fields() {
        let mut care = Care::new();
        let result = bind_and_validate(&mut care, &form(Some("yesterday"), Some("")));
        assert_eq!(result.errors().len(), 2);
        assert!(result.has_field_errors("date"));
        assert!(result.has_field_errors("description"));
    }

    #[test]
    fn test_read_care_form_keeps_whitelisted_fields() {
        let (form, result) = read_care_form(&fields(&[
            ("id", "7"),
            ("date", "2024-04-01"),
            ("petId", "2"),
            ("description", "bath"),
        ]));

        assert!(!result.has_errors());
        assert_eq!(
            form,
            CareForm {
                date: Some("2024-04-01".to_string()),
                description: Some("bath".to_string()),
            }
        );
    }

    #[test]
    fn test_read_care_form_rejects_repeated_fields() {
        let (form, result) = read_care_form(&fields(&[
            ("description", "a"),
            ("description", "b"),
            ("description", "c"),
            ("date", "2024-04-01"),
        ]));

        assert_eq!(form.description.as_deref(), Some("a"));
        assert_eq!(
            result.into_errors(),
            vec![FieldError::new("description", "duplicate", "must be submitted only once")]
        );
    }
}
