use crate::scoring::{Language, RiskTier};
use serde::{Deserialize, Serialize};

/// Result of a successful submission, handed to whatever renders it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionResult {
    pub token: String,
    pub language: Language,
    pub total_score: u64,
    pub risk_tier: RiskTier,
    pub risk_level: String,
    pub recommendation: String,
}

/// Raw claim fields as they arrive from a front end
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaimRequest {
    pub token: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub language: Option<String>,
}

/// Coarse classes a front end maps to its own status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeClass {
    Success,
    Validation,
    NotFound,
    ServerFault,
}

impl OutcomeClass {
    pub fn http_status(self) -> u16 {
        match self {
            OutcomeClass::Success => 200,
            OutcomeClass::Validation => 400,
            OutcomeClass::NotFound => 404,
            OutcomeClass::ServerFault => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    Claimed { name: String },
    /// token, name or email absent; storage was not touched
    MissingData,
    /// no record carries the token
    NotFound,
    /// the data file itself is missing
    StorageUnavailable,
    /// anything else; details went to the log
    Internal,
}

/// Wire shape of a claim outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClaimOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ClaimOutcome::Claimed { .. })
    }

    pub fn class(&self) -> OutcomeClass {
        match self {
            ClaimOutcome::Claimed { .. } => OutcomeClass::Success,
            ClaimOutcome::MissingData => OutcomeClass::Validation,
            ClaimOutcome::NotFound => OutcomeClass::NotFound,
            ClaimOutcome::StorageUnavailable | ClaimOutcome::Internal => OutcomeClass::ServerFault,
        }
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            ClaimOutcome::Claimed { .. } => None,
            ClaimOutcome::MissingData => Some("Missing required data"),
            ClaimOutcome::NotFound => Some("Record not found"),
            ClaimOutcome::StorageUnavailable => Some("Data file not found on server."),
            ClaimOutcome::Internal => Some("An internal server error occurred."),
        }
    }

    pub fn response(&self) -> ClaimResponse {
        match self {
            ClaimOutcome::Claimed { name } => ClaimResponse {
                success: true,
                name: Some(name.clone()),
                error: None,
            },
            other => ClaimResponse {
                success: false,
                name: None,
                error: other.error_message().map(str::to_string),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claimed_response_json() {
        let outcome = ClaimOutcome::Claimed {
            name: "Alice".to_string(),
        };
        let json = serde_json::to_value(outcome.response()).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "name": "Alice" }));
    }

    #[test]
    fn test_failure_response_json() {
        let json = serde_json::to_value(ClaimOutcome::NotFound.response()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "success": false, "error": "Record not found" })
        );
    }

    #[test]
    fn test_outcome_classes_are_distinct() {
        assert_eq!(ClaimOutcome::MissingData.class().http_status(), 400);
        assert_eq!(ClaimOutcome::NotFound.class().http_status(), 404);
        assert_eq!(ClaimOutcome::StorageUnavailable.class().http_status(), 500);
        assert_eq!(ClaimOutcome::Internal.class().http_status(), 500);
        assert_ne!(
            ClaimOutcome::StorageUnavailable.error_message(),
            ClaimOutcome::NotFound.error_message()
        );
    }

    #[test]
    fn test_claim_request_from_json() {
        let request: ClaimRequest =
            serde_json::from_str(r#"{"token": "T1", "name": "Alice"}"#).unwrap();
        assert_eq!(request.token.as_deref(), Some("T1"));
        assert!(request.email.is_none());
        assert!(request.language.is_none());
    }
}
