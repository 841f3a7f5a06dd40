pub mod config;
pub mod survey;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    routing::post,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::RelayConfig;
use survey::{
    FailureResponse, PayloadBuilder, SubmitSurveyResponse, SurveyRelayService, SurveySubmission,
    ZendeskClient,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        survey::handlers::submit_survey_handler,
    ),
    components(
        schemas(SurveySubmission, SubmitSurveyResponse, FailureResponse)
    ),
    tags(
        (name = "surveys", description = "Customer satisfaction survey relay")
    ),
    info(
        title = "CSAT Survey Relay",
        version = "0.1.0",
        description = "Relays help center satisfaction surveys into ticket updates and profile events"
    )
)]
struct ApiDoc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub survey_service: SurveyRelayService,
}

/// Browser preflight and POST access for the survey page
fn cors_layer(allowed_origin: &str) -> CorsLayer {
    let origin = if allowed_origin == "*" {
        AllowOrigin::any()
    } else {
        match allowed_origin.parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}, allowing any", allowed_origin);
                AllowOrigin::any()
            }
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(Duration::from_secs(86400))
}

/// Creates and configures the application router
pub fn create_router(state: AppState, allowed_origin: &str) -> Router {
    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui")
            .url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/submit-survey", post(survey::submit_survey_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(allowed_origin)),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("CSAT Survey Relay - Starting...");

    let config = RelayConfig::from_env().expect("Invalid relay configuration");

    // A missing token does not stop the server; every downstream call will fail auth
    match &config.credentials.api_token {
        Some(token) => tracing::info!(
            "ZENDESK_TOKEN loaded successfully (length: {} characters)",
            token.len()
        ),
        None => tracing::error!(
            "ZENDESK_TOKEN environment variable is NOT set; ticketing calls will fail authentication"
        ),
    }
    tracing::info!("Using Zendesk base URL: {}", config.base_url);
    tracing::info!("Admin email: {}", config.credentials.admin_email);

    let gateway = Arc::new(ZendeskClient::from_config(&config));
    let survey_service = SurveyRelayService::new(gateway, PayloadBuilder::new(config.field_ids));
    let app = create_router(AppState { survey_service }, &config.allowed_origin);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Survey relay is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
