use std::sync::Arc;

use tracing::Instrument;
use uuid::Uuid;
use validator::Validate;

use crate::survey::{
    error::{GatewayError, SubmissionError},
    gateway::TicketingGateway,
    models::{SubmitSurveyResponse, SurveyReport, SurveySubmission},
    payload::PayloadBuilder,
    stage::SubmissionStage,
};

/// Service layer relaying surveys to the ticketing service
#[derive(Clone)]
pub struct SurveyRelayService {
    gateway: Arc<dyn TicketingGateway>,
    payloads: PayloadBuilder,
}

impl SurveyRelayService {
    /// Create a new SurveyRelayService
    pub fn new(gateway: Arc<dyn TicketingGateway>, payloads: PayloadBuilder) -> Self {
        Self { gateway, payloads }
    }

    /// Relay one survey submission
    ///
    /// This method:
    /// 1. Validates that `ticketId` and `rating` are present
    /// 2. Updates the ticket with custom fields, tags and an internal note
    /// 3. Publishes a profile event for the customer
    ///
    /// The two calls run strictly in order. A failed ticket update stops the
    /// submission before any event exists. A failed event publish leaves the
    /// ticket update in place; nothing is rolled back.
    ///
    /// The relay runs on its own task, so a caller that goes away mid-request
    /// does not cancel the downstream calls already under way.
    pub async fn submit(
        &self,
        submission: SurveySubmission,
    ) -> Result<SubmitSurveyResponse, SubmissionError> {
        let submission_id = Uuid::new_v4();
        let span = tracing::info_span!("submit_survey", %submission_id);
        let service = self.clone();

        let relay = tokio::spawn(
            async move { service.relay(submission).await }.instrument(span),
        );

        relay.await.map_err(|err| {
            tracing::error!("Survey relay task for {} did not complete: {}", submission_id, err);
            SubmissionError::Internal(err.to_string())
        })?
    }

    async fn relay(
        &self,
        submission: SurveySubmission,
    ) -> Result<SubmitSurveyResponse, SubmissionError> {
        let mut stage = SubmissionStage::Received;

        // 1. Validate
        let report = validate_submission(submission)?;
        stage = advance(stage, SubmissionStage::Validated);

        tracing::info!(
            "Received survey data for ticket #{} | Rating: {} | Email: {}",
            report.ticket_id,
            report.rating,
            report.user_email.as_deref().filter(|e| !e.is_empty()).unwrap_or("anonymous")
        );

        // 2. Update ticket
        let ticket_payload = self.payloads.build_ticket_update(&report);
        tracing::info!("Attempting to update ticket...");
        let receipt = self
            .gateway
            .update_ticket(&report.ticket_id, &ticket_payload)
            .await
            .map_err(|source| {
                log_gateway_failure(&source);
                SubmissionError::Gateway { stage, source }
            })?;
        tracing::info!("Ticket updated successfully: {}", receipt.status);
        stage = advance(stage, SubmissionStage::TicketUpdated);

        // 3. Publish profile event
        tracing::info!("Creating custom event...");
        let event_payload = self.payloads.build_profile_event(&report);
        let receipt = self
            .gateway
            .publish_event(&event_payload)
            .await
            .map_err(|source| {
                log_gateway_failure(&source);
                tracing::warn!(
                    "Ticket #{} was already updated; the update is not rolled back",
                    report.ticket_id
                );
                SubmissionError::Gateway { stage, source }
            })?;
        tracing::info!("Custom event created successfully: {}", receipt.status);
        stage = advance(stage, SubmissionStage::EventPublished);

        debug_assert!(stage.is_terminal());
        Ok(SubmitSurveyResponse::submitted())
    }
}

/// Check required fields and turn the raw body into a report
pub fn validate_submission(submission: SurveySubmission) -> Result<SurveyReport, SubmissionError> {
    if let Err(errors) = submission.validate() {
        tracing::info!("Validation failed: missing ticketId or rating ({:?})", errors);
        return Err(SubmissionError::missing_required_fields());
    }

    SurveyReport::from_submission(submission).ok_or_else(SubmissionError::missing_required_fields)
}

fn advance(from: SubmissionStage, to: SubmissionStage) -> SubmissionStage {
    debug_assert!(
        SubmissionStage::is_valid_transition(from, to),
        "invalid submission transition from {} to {}",
        from,
        to
    );
    to
}

fn log_gateway_failure(err: &GatewayError) {
    match err {
        GatewayError::Rejected { status, body } => {
            tracing::error!("Zendesk API failed with status: {}", status);
            tracing::error!("Zendesk error details: {}", body);
        }
        GatewayError::Unreachable { message } => {
            tracing::error!("No response from Zendesk: {}", message);
        }
        GatewayError::MalformedRequest { message } => {
            tracing::error!("Unexpected error: {}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_follows_forward_steps() {
        let stage = advance(SubmissionStage::Received, SubmissionStage::Validated);
        assert_eq!(stage, SubmissionStage::Validated);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "invalid submission transition")]
    fn test_advance_rejects_skipped_stage() {
        advance(SubmissionStage::Received, SubmissionStage::EventPublished);
    }
}
