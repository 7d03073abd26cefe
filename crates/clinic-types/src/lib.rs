//! Validated primitive types shared across the clinic workflow crates.
//!
//! Contains the closed domain enums (role, triage priority, appointment
//! status) with parsing for API boundaries, and `NonEmptyText` for inputs
//! that must carry content.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Error returned when a domain enum cannot be parsed from its
/// wire representation.
#[derive(Debug, thiserror::Error)]
#[error("unrecognised {kind}: {value}")]
pub struct ParseEnumError {
    /// Which enum failed to parse (e.g. "triage priority").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one
/// non-whitespace character. The input is automatically trimmed of leading
/// and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the
    /// trimmed result is empty, an error is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// The role a user holds in the clinic. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Doctor,
    Nurse,
    Patient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "DOCTOR",
            Role::Nurse => "NURSE",
            Role::Patient => "PATIENT",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DOCTOR" => Ok(Role::Doctor),
            "NURSE" => Ok(Role::Nurse),
            "PATIENT" => Ok(Role::Patient),
            _ => Err(ParseEnumError {
                kind: "role",
                value: s.to_owned(),
            }),
        }
    }
}

/// Clinical urgency tag assigned at patient registration. Drives the
/// consultation order in the triage queue and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriagePriority {
    High,
    Medium,
    Low,
}

impl TriagePriority {
    /// Sort rank for the triage queue: lower ranks are seen first.
    pub fn rank(&self) -> u8 {
        match self {
            TriagePriority::High => 0,
            TriagePriority::Medium => 1,
            TriagePriority::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TriagePriority::High => "HIGH",
            TriagePriority::Medium => "MEDIUM",
            TriagePriority::Low => "LOW",
        }
    }
}

impl std::fmt::Display for TriagePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TriagePriority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(TriagePriority::High),
            "MEDIUM" => Ok(TriagePriority::Medium),
            "LOW" => Ok(TriagePriority::Low),
            _ => Err(ParseEnumError {
                kind: "triage priority",
                value: s.to_owned(),
            }),
        }
    }
}

/// Where an appointment sits in its lifecycle.
///
/// The only legal path is WAITING → IN_CONSULT → COMPLETED; transitions
/// are enforced by `clinic-core`'s lifecycle module, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Waiting,
    InConsult,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Waiting => "WAITING",
            AppointmentStatus::InConsult => "IN_CONSULT",
            AppointmentStatus::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WAITING" => Ok(AppointmentStatus::Waiting),
            "IN_CONSULT" => Ok(AppointmentStatus::InConsult),
            "COMPLETED" => Ok(AppointmentStatus::Completed),
            _ => Err(ParseEnumError {
                kind: "appointment status",
                value: s.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_non_empty_text_trims_and_rejects_blank() {
        let text = NonEmptyText::new("  John Doe  ").expect("should accept non-empty input");
        assert_eq!(text.as_str(), "John Doe");

        assert!(matches!(NonEmptyText::new("   "), Err(TextError::Empty)));
        assert!(matches!(NonEmptyText::new(""), Err(TextError::Empty)));
    }

    #[test]
    fn test_priority_parses_case_insensitively() {
        assert_eq!(
            TriagePriority::from_str("high").expect("should parse"),
            TriagePriority::High
        );
        assert_eq!(
            TriagePriority::from_str(" MEDIUM ").expect("should parse"),
            TriagePriority::Medium
        );

        let err = TriagePriority::from_str("URGENT").expect_err("should reject unknown priority");
        assert_eq!(err.kind, "triage priority");
    }

    #[test]
    fn test_priority_rank_orders_high_first() {
        assert!(TriagePriority::High.rank() < TriagePriority::Medium.rank());
        assert!(TriagePriority::Medium.rank() < TriagePriority::Low.rank());
    }

    #[test]
    fn test_status_round_trips_through_serde() {
        let json = serde_json::to_string(&AppointmentStatus::InConsult).expect("serialize");
        assert_eq!(json, "\"IN_CONSULT\"");
        let back: AppointmentStatus = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, AppointmentStatus::InConsult);
    }

    #[test]
    fn test_role_display_matches_wire_form() {
        assert_eq!(Role::Doctor.to_string(), "DOCTOR");
        assert_eq!(Role::from_str("nurse").expect("should parse"), Role::Nurse);
    }
}
