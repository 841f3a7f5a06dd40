use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

use crate::survey::stage::SubmissionStage;

/// Failure of a single call to the ticketing service
///
/// The three shapes stay distinct: the service answered with an error status,
/// nothing answered at all, or the request never left the process.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Downstream responded with a non-success status
    #[error("Request failed with status code {status}")]
    Rejected { status: u16, body: Value },

    /// No response received (connection refused, DNS, timeout)
    #[error("No response from ticketing service: {message}")]
    Unreachable { message: String },

    /// Request could not be constructed or sent
    #[error("Request could not be sent: {message}")]
    MalformedRequest { message: String },
}

impl GatewayError {
    /// HTTP status reported by the ticketing service, if it answered
    pub fn downstream_status(&self) -> Option<u16> {
        match self {
            GatewayError::Rejected { status, .. } => Some(*status),
            GatewayError::Unreachable { .. } | GatewayError::MalformedRequest { .. } => None,
        }
    }

    pub fn unreachable(message: impl Into<String>) -> Self {
        GatewayError::Unreachable { message: message.into() }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        GatewayError::MalformedRequest { message: message.into() }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            GatewayError::malformed(err.to_string())
        } else {
            GatewayError::unreachable(err.to_string())
        }
    }
}

/// Outcome of a submission that did not complete
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// `ticketId` or `rating` missing, or the body was not a survey at all
    #[error("{0}")]
    Validation(String),

    /// A downstream call failed; `stage` is the last stage reached
    #[error("{source}")]
    Gateway {
        stage: SubmissionStage,
        #[source]
        source: GatewayError,
    },

    /// The relay task itself failed (panic or runtime shutdown)
    #[error("{0}")]
    Internal(String),
}

impl SubmissionError {
    pub fn missing_required_fields() -> Self {
        SubmissionError::Validation("Missing ticketId or rating".to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            SubmissionError::Validation(_) => StatusCode::BAD_REQUEST,
            SubmissionError::Gateway { .. } | SubmissionError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn to_failure_response(&self) -> FailureResponse {
        match self {
            SubmissionError::Validation(message) => {
                tracing::debug!("Validation failed: {}", message);
                FailureResponse {
                    success: false,
                    message: message.clone(),
                    error: None,
                    zendesk_status: None,
                }
            }
            SubmissionError::Gateway { stage, source } => {
                tracing::error!("Survey relay failed after stage {}: {}", stage, source);
                FailureResponse {
                    success: false,
                    message: "Failed to submit survey".to_string(),
                    error: Some(source.to_string()),
                    zendesk_status: Some(match source.downstream_status() {
                        Some(code) => DownstreamStatus::Code(code),
                        None => DownstreamStatus::Label("unknown".to_string()),
                    }),
                }
            }
            SubmissionError::Internal(message) => {
                tracing::error!("Survey relay failed internally: {}", message);
                FailureResponse {
                    success: false,
                    message: "Failed to submit survey".to_string(),
                    error: Some(message.clone()),
                    zendesk_status: Some(DownstreamStatus::Label("unknown".to_string())),
                }
            }
        }
    }
}

/// Downstream status as reported to the caller: a number, or "unknown"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DownstreamStatus {
    Code(u16),
    Label(String),
}

/// Body of every non-success response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FailureResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Failed to submit survey")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Request failed with status code 401")]
    pub error: Option<String>,
    #[serde(rename = "zendeskStatus", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object, example = 401)]
    pub zendesk_status: Option<DownstreamStatus>,
}

impl IntoResponse for SubmissionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.to_failure_response())).into_response()
    }
}
