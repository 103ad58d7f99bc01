use anyhow::Context;
use storage::Database;
use tokio::net::TcpListener;
use tokio::signal;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod extract;
mod features;
mod middleware;
mod routes;

use config::Config;
use features::{events, home, participants, sports, teams};
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        home::handlers::get_summary,
        sports::handlers::list_sports,
        sports::handlers::get_sport,
        sports::handlers::get_sport_detailed,
        sports::handlers::create_sport,
        sports::handlers::update_sport,
        sports::handlers::delete_sport,
        participants::handlers::list_participants,
        participants::handlers::get_participant,
        participants::handlers::get_participant_detailed,
        participants::handlers::create_participant,
        participants::handlers::update_participant,
        participants::handlers::delete_participant,
        events::handlers::list_events,
        events::handlers::get_event,
        events::handlers::get_event_detailed,
        events::handlers::create_event,
        events::handlers::update_event,
        events::handlers::delete_event,
        events::handlers::list_registrations,
        events::handlers::register_participant,
        events::handlers::unregister_participant,
        teams::handlers::list_teams,
        teams::handlers::get_team,
        teams::handlers::create_team,
        teams::handlers::update_team,
        teams::handlers::delete_team,
    ),
    components(
        schemas(
            storage::dto::home::HomeSummary,
            storage::dto::sport::CreateSportRequest,
            storage::dto::sport::UpdateSportRequest,
            storage::dto::sport::SportResponse,
            storage::dto::sport::SportDetailResponse,
            storage::dto::participant::CreateParticipantRequest,
            storage::dto::participant::UpdateParticipantRequest,
            storage::dto::participant::ParticipantResponse,
            storage::dto::participant::ParticipantDetailResponse,
            storage::dto::participant::ParticipantEventSummary,
            storage::dto::event::CreateEventRequest,
            storage::dto::event::UpdateEventRequest,
            storage::dto::event::EventResponse,
            storage::dto::event::EventDetailResponse,
            storage::dto::event::EventWindow,
            storage::dto::event::SportInfo,
            storage::dto::event::RegistrationDetail,
            storage::dto::event::RegisterParticipantRequest,
            storage::dto::team::CreateTeamRequest,
            storage::dto::team::UpdateTeamRequest,
            storage::dto::team::TeamResponse,
            storage::models::Sport,
            storage::models::Participant,
            storage::models::Event,
            storage::models::Registration,
            storage::models::Team,
        )
    ),
    tags(
        (name = "home", description = "Landing page summary"),
        (name = "sports", description = "Sport categories"),
        (name = "participants", description = "People who register for events"),
        (name = "events", description = "Scheduled events and their registrations"),
        (name = "teams", description = "Teams playing a sport"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting sports events API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Opening database at: {}", config.database_url);
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty, every write request will be rejected");
    }

    let app = routes::create_router(db, api_keys)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
