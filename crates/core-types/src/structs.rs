use crate::enums::Gender;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A persisted candidate record.
///
/// `id` is assigned by the database (BIGSERIAL) and is immutable for the
/// lifetime of the row; the sequence never rewinds, so ids are not reused
/// after deletion.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub age: i32,
    #[sqlx(try_from = "String")]
    pub gender: Gender,
    pub email: String,
    pub phone_number: String,
}

/// The payload for creating a candidate, and for full (PUT) replacement.
/// Every field is required; the validation rules mirror the table schema.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewCandidate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: i32,
    pub gender: Gender,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone_number must not be empty"))]
    pub phone_number: String,
}

/// The payload for a partial (PATCH) update. Only the supplied fields are
/// validated and applied; absent fields keep their stored values.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CandidateUpdate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(range(min = 0, max = 150, message = "age must be between 0 and 150"))]
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "phone_number must not be empty"))]
    pub phone_number: Option<String>,
}

impl CandidateUpdate {
    /// True when the payload carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.age.is_none()
            && self.gender.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn valid_payload() -> NewCandidate {
        NewCandidate {
            name: "Test User".to_string(),
            age: 28,
            gender: Gender::Male,
            email: "test.user@example.com".to_string(),
            phone_number: "9876543210".to_string(),
        }
    }

    #[test]
    fn valid_payload_passes_validation() {
        assert!(valid_payload().validate().is_ok());
    }

    #[test]
    fn blank_name_fails_validation() {
        let mut payload = valid_payload();
        payload.name = String::new();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn malformed_email_fails_validation() {
        let mut payload = valid_payload();
        payload.email = "not-an-email".to_string();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn out_of_range_age_fails_validation() {
        let mut payload = valid_payload();
        payload.age = -1;
        assert!(payload.validate().is_err());
    }

    #[test]
    fn partial_update_validates_only_supplied_fields() {
        // Nothing supplied: nothing to validate.
        let empty = CandidateUpdate::default();
        assert!(empty.is_empty());
        assert!(empty.validate().is_ok());

        // A single good field passes even though the rest are absent.
        let name_only = CandidateUpdate {
            name: Some("Updated Name".to_string()),
            ..Default::default()
        };
        assert!(!name_only.is_empty());
        assert!(name_only.validate().is_ok());

        // A supplied field is still checked.
        let bad_email = CandidateUpdate {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn missing_required_field_is_a_deserialization_error() {
        let body = r#"{"name":"x","age":30,"gender":"M","email":"x@example.com"}"#;
        assert!(serde_json::from_str::<NewCandidate>(body).is_err());
    }
}
