use anyhow::Context;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use feed::config::PitchsideConfig;
use feed::generator::OllamaClient;
use feed::refresh::{self, FixtureListing, NO_LIVE_MATCHES, RefreshOutcome};
use feed::session::{MatchSession, select_match};
use feed::sources::ApiFootballClient;
use pitchside_types::{CommentaryLine, Fixture, FixtureId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
struct AppState {
    source: ApiFootballClient,
    generator: OllamaClient,
    /// Held for the whole of a select or fetch so actions run one at a time.
    session: Arc<Mutex<Option<MatchSession>>>,
    fixtures: Arc<Mutex<Vec<Fixture>>>,
    poll_interval_secs: u64,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    error: anyhow::Error,
}

impl ApiError {
    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow::anyhow!(message.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = format!("error: {}", self.error);
        (self.status, body).into_response()
    }
}

type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Deserialize)]
struct SelectBody {
    fixture_id: FixtureId,
}

#[derive(Debug, Serialize)]
struct FixturesResponse {
    #[serde(flatten)]
    listing: FixtureListing,
    warning: Option<&'static str>,
    poll_interval_secs: u64,
}

#[derive(Debug, Serialize)]
struct FeedLine {
    display: String,
    #[serde(flatten)]
    line: CommentaryLine,
}

#[derive(Debug, Serialize, Default)]
struct FeedResponse {
    fixture_id: Option<FixtureId>,
    fixture: Option<Fixture>,
    lines: Vec<FeedLine>,
    notice: Option<&'static str>,
    error: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = PitchsideConfig::from_env()?;
    let state = AppState {
        source: ApiFootballClient::from_config(&config).context("build api-football client")?,
        generator: OllamaClient::from_config(&config)?,
        session: Arc::new(Mutex::new(None)),
        fixtures: Arc::new(Mutex::new(Vec::new())),
        poll_interval_secs: config.poll_interval_secs,
    };

    let bind_addr = config.dashboard_bind;
    info!(
        addr = %bind_addr,
        model = %state.generator.model(),
        api = %config.api_base,
        "⚽ Pitchside running at http://{bind_addr}"
    );

    let app = Router::new()
        .route("/", get(index))
        .route("/health", get(|| async { "ok" }))
        .route("/api/fixtures", get(get_fixtures))
        .route("/api/select", post(select_fixture))
        .route("/api/fetch", post(fetch_commentary))
        .route("/api/feed", get(get_feed))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("bind {bind_addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}

async fn get_fixtures(State(state): State<AppState>) -> Json<FixturesResponse> {
    let listing = refresh::list_fixtures(&state.source).await;
    *state.fixtures.lock().await = listing.fixtures.clone();
    let warning = (listing.error.is_none() && listing.fixtures.is_empty()).then_some(NO_LIVE_MATCHES);
    Json(FixturesResponse {
        listing,
        warning,
        poll_interval_secs: state.poll_interval_secs,
    })
}

async fn select_fixture(
    State(state): State<AppState>,
    Json(body): Json<SelectBody>,
) -> Json<FeedResponse> {
    let mut guard = state.session.lock().await;
    let session = select_match(guard.take(), body.fixture_id);
    let fixtures = state.fixtures.lock().await;
    let response = feed_response(&session, &fixtures, None);
    *guard = Some(session);
    Json(response)
}

async fn fetch_commentary(State(state): State<AppState>) -> ApiResult<Json<FeedResponse>> {
    let mut guard = state.session.lock().await;
    let session = guard
        .as_mut()
        .ok_or_else(|| ApiError::bad_request("select a match before fetching commentary"))?;

    let outcome = refresh::refresh(session, &state.source, &state.generator).await;
    let fixtures = state.fixtures.lock().await;
    Ok(Json(feed_response(session, &fixtures, Some(&outcome))))
}

async fn get_feed(State(state): State<AppState>) -> Json<FeedResponse> {
    let guard = state.session.lock().await;
    let fixtures = state.fixtures.lock().await;
    match guard.as_ref() {
        Some(session) => Json(feed_response(session, &fixtures, None)),
        None => Json(FeedResponse::default()),
    }
}

fn feed_response(
    session: &MatchSession,
    fixtures: &[Fixture],
    outcome: Option<&RefreshOutcome>,
) -> FeedResponse {
    FeedResponse {
        fixture_id: Some(session.fixture_id()),
        fixture: fixtures
            .iter()
            .find(|f| f.id == session.fixture_id())
            .cloned(),
        lines: session
            .feed()
            .map(|line| FeedLine {
                display: line.to_string(),
                line: line.clone(),
            })
            .collect(),
        notice: outcome.and_then(RefreshOutcome::notice),
        error: outcome.and_then(|o| o.error.clone()),
    }
}
