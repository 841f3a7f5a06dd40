// Survey relay module
// Validates help center satisfaction surveys and relays them to the ticketing service

pub mod error;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod payload;
pub mod service;
pub mod stage;
pub mod taxonomy;

pub use error::{DownstreamStatus, FailureResponse, GatewayError, SubmissionError};
pub use gateway::{GatewayReceipt, TicketingGateway, ZendeskClient};
pub use handlers::submit_survey_handler;
pub use models::{SubmitSurveyResponse, SurveyReport, SurveySubmission, TicketId};
pub use payload::PayloadBuilder;
pub use service::SurveyRelayService;
pub use stage::SubmissionStage;
