//! Guards for fields the upstream defaulting stage must have filled in.
//!
//! A missing field here is a caller contract violation. The guards never
//! substitute a default; they report the section and every absent field.

use crate::TranslateError;

/// Return the value of a required field, or a `MissingFields` error naming it.
///
/// # Errors
///
/// Returns [`TranslateError::MissingFields`] when `value` is `None`.
pub fn require<'a, T: ?Sized>(
    section: &str,
    field: &str,
    value: Option<&'a T>,
) -> Result<&'a T, TranslateError> {
    value.ok_or_else(|| TranslateError::MissingFields {
        section: section.to_owned(),
        fields: vec![field.to_owned()],
    })
}

/// Build the error for a section from `(field, present)` pairs.
///
/// Only the absent fields are named, in the order given.
#[must_use]
pub fn missing_fields(section: &str, fields: &[(&str, bool)]) -> TranslateError {
    TranslateError::MissingFields {
        section: section.to_owned(),
        fields: fields
            .iter()
            .filter(|(_, present)| !present)
            .map(|(name, _)| (*name).to_owned())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_returns_present_value() {
        let value = Some(3);
        assert_eq!(require("section", "field", value.as_ref()).unwrap(), &3);
    }

    #[test]
    fn require_names_missing_field() {
        let err = require::<str>("options", "devtool", None).unwrap_err();
        assert_eq!(err.missing_fields(), ["devtool"]);
        assert!(err.to_string().contains("'options'"));
    }

    #[test]
    fn missing_fields_lists_only_absent() {
        let err = missing_fields(
            "experiments",
            &[("lazyCompilation", false), ("incrementalRebuild", true)],
        );
        match err {
            TranslateError::MissingFields { section, fields } => {
                assert_eq!(section, "experiments");
                assert_eq!(fields, ["lazyCompilation"]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn missing_fields_keeps_given_order() {
        let err = missing_fields("output", &[("path", false), ("filename", true), ("uniqueName", false)]);
        assert_eq!(err.missing_fields(), ["path", "uniqueName"]);
    }
}
