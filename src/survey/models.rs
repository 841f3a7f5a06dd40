use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::validate_present;

/// Sentinel identity used when the survey carries no email address
pub const ANONYMOUS_EMAIL: &str = "anonymous@example.com";

/// Source label shared by the profile and the event
pub const EVENT_SOURCE: &str = "help_center_survey";

/// Raw survey body as posted from the help center page
///
/// Used for POST /submit-survey requests. Nothing here is trusted until
/// `validate()` has passed and the value has been turned into a `SurveyReport`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    /// Ticket identifier, string or number
    #[validate(required, custom = "validate_present")]
    #[schema(value_type = Object, example = "12345")]
    pub ticket_id: Option<Value>,
    /// One of "1".."5"
    #[validate(required, custom = "validate_present")]
    #[schema(value_type = Object, example = "5")]
    pub rating: Option<Value>,
    #[schema(example = "Quick and friendly answer")]
    pub positive: Option<String>,
    #[schema(example = "Nothing")]
    pub improvement: Option<String>,
    #[schema(example = "customer@example.com")]
    pub user_email: Option<String>,
}

/// Opaque ticket identifier, kept in the JSON form it arrived in
#[derive(Debug, Clone, PartialEq)]
pub struct TicketId(Value);

impl TicketId {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&plain_text(&self.0))
    }
}

/// Text of a JSON scalar as a browser would print it
///
/// Strings lose their quotes and whole floats drop the fraction, so `5.0`
/// reads as `5`.
pub fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .map(|f| f.to_string())
            .unwrap_or_else(|| n.to_string()),
        other => other.to_string(),
    }
}

/// Survey that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyReport {
    pub ticket_id: TicketId,
    /// Rating exactly as posted, echoed into the profile event
    pub raw_rating: Value,
    /// Text form of the rating used for lookups and the comment
    pub rating: String,
    pub positive: Option<String>,
    pub improvement: Option<String>,
    pub user_email: Option<String>,
}

impl SurveyReport {
    /// Build a report from a submission whose required fields are present
    ///
    /// Returns `None` when `ticketId` or `rating` is absent, so callers are
    /// expected to have run `validate()` first.
    pub fn from_submission(submission: SurveySubmission) -> Option<Self> {
        let ticket_id = submission.ticket_id?;
        let raw_rating = submission.rating?;
        let rating = plain_text(&raw_rating);

        Some(Self {
            ticket_id: TicketId::new(ticket_id),
            raw_rating,
            rating,
            positive: submission.positive,
            improvement: submission.improvement,
            user_email: submission.user_email,
        })
    }

    /// Email the profile event is recorded against
    pub fn profile_email(&self) -> &str {
        self.user_email
            .as_deref()
            .filter(|email| !email.is_empty())
            .unwrap_or(ANONYMOUS_EMAIL)
    }
}

/// Body of the ticket update call: PUT /api/v2/tickets/{id}.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketUpdatePayload {
    pub ticket: TicketUpdate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketUpdate {
    pub custom_fields: Vec<CustomFieldValue>,
    pub tags: Vec<String>,
    pub comment: TicketComment,
}

/// One custom field assignment; a missing value leaves the field untouched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldValue {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketComment {
    pub body: String,
    pub public: bool,
}

/// Body of the profile event call: POST /api/v2/user_profiles/events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEventPayload {
    pub profile: Profile,
    pub event: ProfileEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub source: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub identifiers: Vec<ProfileIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileIdentifier {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileEvent {
    pub source: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub properties: EventProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventProperties {
    pub rating: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub positive_feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement_suggestions: Option<String>,
    pub ticket_id: Value,
    pub submitted_at: String,
}

/// Response DTO for a fully relayed survey
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmitSurveyResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = "Survey submitted and tracked successfully")]
    pub message: String,
}

impl SubmitSurveyResponse {
    pub fn submitted() -> Self {
        Self {
            success: true,
            message: "Survey submitted and tracked successfully".to_string(),
        }
    }
}
