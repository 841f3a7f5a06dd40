use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::CustomFieldIds;
use crate::survey::{
    models::{
        CustomFieldValue, EventProperties, Profile, ProfileEvent, ProfileEventPayload,
        ProfileIdentifier, SurveyReport, TicketComment, TicketUpdate, TicketUpdatePayload,
        EVENT_SOURCE,
    },
    taxonomy,
};

/// Placeholder shown in the ticket comment when no positive feedback was given
pub const NO_FEEDBACK_PLACEHOLDER: &str = "—";

/// Builds the two downstream payloads from a validated survey
#[derive(Debug, Clone, Copy)]
pub struct PayloadBuilder {
    field_ids: CustomFieldIds,
}

impl PayloadBuilder {
    pub fn new(field_ids: CustomFieldIds) -> Self {
        Self { field_ids }
    }

    /// Custom fields, sentiment tags and an internal comment for the ticket
    pub fn build_ticket_update(&self, report: &SurveyReport) -> TicketUpdatePayload {
        let rating = report.rating.as_str();

        let custom_fields = vec![
            CustomFieldValue {
                id: self.field_ids.rating,
                value: Some(taxonomy::tag_for(rating).to_string()),
            },
            CustomFieldValue {
                id: self.field_ids.positive,
                value: Some(report.positive.clone().unwrap_or_default()),
            },
            CustomFieldValue {
                id: self.field_ids.improvement,
                value: report.improvement.clone(),
            },
        ];

        // Sentiment tags only match a rating posted as text
        let tags = if report.raw_rating.is_string() {
            taxonomy::sentiment_tags_for(rating)
                .into_iter()
                .map(str::to_string)
                .collect()
        } else {
            Vec::new()
        };

        TicketUpdatePayload {
            ticket: TicketUpdate {
                custom_fields,
                tags,
                comment: TicketComment {
                    body: feedback_comment(report),
                    public: false,
                },
            },
        }
    }

    /// Profile event stamped with the current time
    pub fn build_profile_event(&self, report: &SurveyReport) -> ProfileEventPayload {
        self.build_profile_event_at(report, Utc::now())
    }

    pub fn build_profile_event_at(
        &self,
        report: &SurveyReport,
        submitted_at: DateTime<Utc>,
    ) -> ProfileEventPayload {
        ProfileEventPayload {
            profile: Profile {
                source: EVENT_SOURCE.to_string(),
                kind: "customer".to_string(),
                identifiers: vec![ProfileIdentifier {
                    kind: "email".to_string(),
                    value: report.profile_email().to_string(),
                }],
            },
            event: ProfileEvent {
                source: EVENT_SOURCE.to_string(),
                kind: "survey_submitted".to_string(),
                description: format!("Survey submitted for ticket #{}", report.ticket_id),
                properties: EventProperties {
                    rating: report.raw_rating.clone(),
                    positive_feedback: report.positive.clone(),
                    improvement_suggestions: report.improvement.clone(),
                    ticket_id: report.ticket_id.as_value().clone(),
                    submitted_at: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                },
            },
        }
    }
}

/// Four-line internal note summarising the answers
fn feedback_comment(report: &SurveyReport) -> String {
    let positive = report
        .positive
        .as_deref()
        .filter(|p| !p.is_empty())
        .unwrap_or(NO_FEEDBACK_PLACEHOLDER);
    let improvement = report.improvement.as_deref().unwrap_or_default();

    format!(
        "Customer Feedback Survey:\n\
         Rating: {}/5 – {}\n\
         What went well: {}\n\
         What can we improve: {}",
        report.rating,
        taxonomy::text_for(&report.rating),
        positive,
        improvement
    )
}
