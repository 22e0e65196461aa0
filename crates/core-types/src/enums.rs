use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// The closed set of gender codes a candidate can carry.
///
/// Stored in the database as the single-letter TEXT codes "M", "F" and "O",
/// which are also the wire representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

impl Gender {
    /// Returns the single-letter code used in the database and on the wire.
    pub fn as_code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
            Gender::Other => "O",
        }
    }

    /// Parses a single-letter code back into a `Gender`.
    pub fn from_code(code: &str) -> Result<Self, CoreError> {
        match code {
            "M" => Ok(Gender::Male),
            "F" => Ok(Gender::Female),
            "O" => Ok(Gender::Other),
            other => Err(CoreError::InvalidGender(other.to_string())),
        }
    }
}

// Lets `sqlx::FromRow` decode a TEXT column directly into a `Gender`
// via `#[sqlx(try_from = "String")]`.
impl TryFrom<String> for Gender {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Gender::from_code(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_codes_round_trip() {
        for gender in [Gender::Male, Gender::Female, Gender::Other] {
            assert_eq!(Gender::from_code(gender.as_code()).unwrap(), gender);
        }
    }

    #[test]
    fn unknown_gender_code_is_rejected() {
        assert!(Gender::from_code("X").is_err());
        assert!(Gender::from_code("m").is_err());
        assert!(Gender::from_code("").is_err());
    }

    #[test]
    fn gender_serializes_as_single_letter() {
        assert_eq!(serde_json::to_string(&Gender::Female).unwrap(), "\"F\"");
        let parsed: Gender = serde_json::from_str("\"O\"").unwrap();
        assert_eq!(parsed, Gender::Other);
    }
}
