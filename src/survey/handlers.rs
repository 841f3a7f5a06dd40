// HTTP handlers for survey endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::survey::{
    error::SubmissionError,
    models::{SubmitSurveyResponse, SurveySubmission},
};
use crate::AppState;

/// Relay a satisfaction survey to the ticketing service
/// POST /submit-survey
#[utoipa::path(
    post,
    path = "/submit-survey",
    request_body = SurveySubmission,
    responses(
        (status = 200, description = "Ticket updated and event recorded", body = SubmitSurveyResponse),
        (status = 400, description = "ticketId or rating missing", body = crate::survey::error::FailureResponse,
            example = json!({"success": false, "message": "Missing ticketId or rating"})),
        (status = 500, description = "A ticketing service call failed", body = crate::survey::error::FailureResponse,
            example = json!({"success": false, "message": "Failed to submit survey", "error": "Request failed with status code 401", "zendeskStatus": 401}))
    ),
    tag = "surveys"
)]
pub async fn submit_survey_handler(
    State(state): State<AppState>,
    body: Result<Json<SurveySubmission>, JsonRejection>,
) -> Result<Json<SubmitSurveyResponse>, SubmissionError> {
    let Json(submission) = body.map_err(|rejection| {
        tracing::debug!("Rejected survey body: {}", rejection.body_text());
        SubmissionError::Validation(rejection.body_text())
    })?;

    let response = state.survey_service.submit(submission).await?;

    Ok(Json(response))
}
