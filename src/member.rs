//! Member Records
//!
//! TigerStyle: Plain value objects with closed enumerations.
//!
//! Each enumeration carries a stable integer code (starting at 1) used by
//! the CSV export and accepted by the search endpoint alongside the
//! variant name.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Types
// =============================================================================

/// Member identifier, assigned by the store
pub type MemberId = u32;

// =============================================================================
// Enumerations
// =============================================================================

/// Member occupation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupation {
    Doctor,
    Engineer,
    Professor,
}

impl Occupation {
    /// All occupations in code order.
    pub const ALL: [Occupation; 3] = [Self::Doctor, Self::Engineer, Self::Professor];

    /// Integer code used at the tabular boundary
    pub fn code(self) -> u8 {
        match self {
            Self::Doctor => 1,
            Self::Engineer => 2,
            Self::Professor => 3,
        }
    }

    /// Look up an occupation by integer code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.code() == code)
    }

    /// Display name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Doctor => "Doctor",
            Self::Engineer => "Engineer",
            Self::Professor => "Professor",
        }
    }
}

/// Member marital status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaritalStatus {
    Married,
    Single,
}

impl MaritalStatus {
    /// All marital statuses in code order.
    pub const ALL: [MaritalStatus; 2] = [Self::Married, Self::Single];

    /// Integer code used at the tabular boundary
    pub fn code(self) -> u8 {
        match self {
            Self::Married => 1,
            Self::Single => 2,
        }
    }

    /// Look up a marital status by integer code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.code() == code)
    }

    /// Display name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Married => "Married",
            Self::Single => "Single",
        }
    }
}

/// Member health status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Excellent,
    Good,
    Average,
    Poor,
}

impl HealthStatus {
    /// All health statuses in code order.
    pub const ALL: [HealthStatus; 4] = [Self::Excellent, Self::Good, Self::Average, Self::Poor];

    /// Integer code used at the tabular boundary
    pub fn code(self) -> u8 {
        match self {
            Self::Excellent => 1,
            Self::Good => 2,
            Self::Average => 3,
            Self::Poor => 4,
        }
    }

    /// Look up a health status by integer code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|h| h.code() == code)
    }

    /// Display name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Average => "Average",
            Self::Poor => "Poor",
        }
    }
}

macro_rules! code_or_name {
    ($ty:ident, $label:literal) => {
        impl FromStr for $ty {
            type Err = ParseEnumError;

            /// Accepts either the integer code or the case-insensitive name.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let found = match s.parse::<u8>() {
                    Ok(code) => $ty::from_code(code),
                    Err(_) => $ty::ALL
                        .into_iter()
                        .find(|v| v.as_str().eq_ignore_ascii_case(s)),
                };
                found.ok_or_else(|| ParseEnumError {
                    kind: $label,
                    value: s.to_string(),
                })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

code_or_name!(Occupation, "occupation");
code_or_name!(MaritalStatus, "marital status");
code_or_name!(HealthStatus, "health status");

// =============================================================================
// Member
// =============================================================================

/// A club member record.
///
/// Updates replace the whole record; there is no per-field mutation API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Store-assigned identifier (ignored on create)
    #[serde(default)]
    pub id: MemberId,
    /// Full name
    pub name: String,
    /// Date of birth
    pub date_of_birth: NaiveDate,
    pub occupation: Occupation,
    pub marital_status: MaritalStatus,
    pub health_status: HealthStatus,
    /// Annual salary, two decimal places
    pub salary: Decimal,
    pub number_of_children: u32,
}

impl Member {
    /// Presence checks performed at the boundary before create/update.
    pub fn validate(&self) -> Result<(), MemberError> {
        if self.name.trim().is_empty() {
            return Err(MemberError::NameRequired);
        }
        Ok(())
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Unknown enumeration value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: '{value}'")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

/// Member validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemberError {
    #[error("name is required")]
    NameRequired,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Member {
        Member {
            id: 0,
            name: "Alex Smith".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1980, 5, 17).unwrap(),
            occupation: Occupation::Engineer,
            marital_status: MaritalStatus::Single,
            health_status: HealthStatus::Good,
            salary: Decimal::new(5_432_100, 2),
            number_of_children: 2,
        }
    }

    #[test]
    fn test_codes_start_at_one() {
        assert_eq!(Occupation::Doctor.code(), 1);
        assert_eq!(Occupation::Professor.code(), 3);
        assert_eq!(MaritalStatus::Single.code(), 2);
        assert_eq!(HealthStatus::Poor.code(), 4);
        assert_eq!(HealthStatus::from_code(0), None);
        assert_eq!(Occupation::from_code(4), None);
    }

    #[test]
    fn test_parse_code_or_name() {
        assert_eq!("2".parse::<Occupation>(), Ok(Occupation::Engineer));
        assert_eq!("doctor".parse::<Occupation>(), Ok(Occupation::Doctor));
        assert_eq!(" SINGLE ".parse::<MaritalStatus>(), Ok(MaritalStatus::Single));
        assert_eq!("Average".parse::<HealthStatus>(), Ok(HealthStatus::Average));

        let err = "pilot".parse::<Occupation>().unwrap_err();
        assert_eq!(err.to_string(), "invalid occupation: 'pilot'");
        assert!("9".parse::<MaritalStatus>().is_err());
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["name"], "Alex Smith");
        assert_eq!(json["dateOfBirth"], "1980-05-17");
        assert_eq!(json["occupation"], "Engineer");
        assert_eq!(json["maritalStatus"], "Single");
        assert_eq!(json["numberOfChildren"], 2);
        assert_eq!(json["salary"].as_f64(), Some(54321.0));
    }

    #[test]
    fn test_missing_id_defaults_to_zero() {
        let member: Member = serde_json::from_value(serde_json::json!({
            "name": "Casey White",
            "dateOfBirth": "1990-01-02",
            "occupation": "Doctor",
            "maritalStatus": "Married",
            "healthStatus": "Excellent",
            "salary": 75000.5,
            "numberOfChildren": 0
        }))
        .unwrap();
        assert_eq!(member.id, 0);
        assert_eq!(member.salary, Decimal::new(7_500_050, 2));
    }

    #[test]
    fn test_validate() {
        assert!(sample().validate().is_ok());

        let mut blank = sample();
        blank.name = "   ".to_string();
        assert_eq!(blank.validate(), Err(MemberError::NameRequired));

        let mut long = sample();
        long.name = "x".repeat(300);
        assert!(long.validate().is_ok());
    }
}
