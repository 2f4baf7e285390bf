//! HTTP API
//!
//! TigerStyle: Thin axum handlers over the member service.
//!
//! Routes:
//! - `GET    /health`
//! - `GET    /api/members`             list (ascending id)
//! - `POST   /api/members`             create
//! - `GET    /api/members/search`      `occupation`, `maritalStatus`, `and`
//! - `GET    /api/members/export`      CSV download
//! - `GET    /api/members/:id`         get
//! - `PUT    /api/members/:id`         replace
//! - `DELETE /api/members/:id`         delete
//! - `POST   /api/auth/login`          demo login

use crate::auth::{AuthError, DemoCredentials, LoginRequest, LoginResponse};
use crate::config::ServerConfig;
use crate::export::{render_csv, CSV_CONTENT_TYPE, CSV_FILE_NAME};
use crate::member::{MaritalStatus, Member, MemberError, MemberId, Occupation, ParseEnumError};
use crate::repository::InMemoryMemberRepository;
use crate::seed::SeedError;
use crate::service::MemberService;
use crate::store::{new_shared_store, MemberQuery, MemberStore, StoreError};
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// State
// =============================================================================

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub members: MemberService,
    pub credentials: Arc<DemoCredentials>,
}

impl AppState {
    /// Create state from an existing service
    pub fn new(members: MemberService, credentials: DemoCredentials) -> Self {
        Self {
            members,
            credentials: Arc::new(credentials),
        }
    }

    /// Seed a fresh in-memory store and wire the service over it
    pub fn seeded(config: &ServerConfig, today: NaiveDate) -> Result<Self, SeedError> {
        let store = new_shared_store(MemberStore::seeded(config.seed, today)?);
        let repo = Arc::new(InMemoryMemberRepository::new(store));
        Ok(Self::new(MemberService::new(repo), config.credentials.clone()))
    }
}

// =============================================================================
// Router
// =============================================================================

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/members", get(list_members).post(create_member))
        .route("/api/members/search", get(search_members))
        .route("/api/members/export", get(export_members))
        .route(
            "/api/members/:id",
            get(get_member).put(update_member).delete(delete_member),
        )
        .route("/api/auth/login", post(login))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Handlers
// =============================================================================

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "members": state.members.count().await,
    }))
}

async fn list_members(State(state): State<AppState>) -> Json<Vec<Member>> {
    Json(state.members.list().await)
}

async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<MemberId>,
) -> Result<Json<Member>, ApiError> {
    state
        .members
        .get(id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

/// Raw search query string
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub occupation: Option<String>,
    pub marital_status: Option<String>,
    /// AND/OR switch, `true`/`false` in any case; absent or blank means OR
    pub and: Option<String>,
}

impl SearchParams {
    /// Parse enum predicates; blank values count as absent
    pub fn into_query(self) -> Result<MemberQuery, ApiError> {
        Ok(MemberQuery {
            occupation: parse_optional::<Occupation>(self.occupation)?,
            marital_status: parse_optional::<MaritalStatus>(self.marital_status)?,
            match_all: parse_flag(self.and)?,
        })
    }
}

fn parse_flag(raw: Option<String>) -> Result<bool, ApiError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Some(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        Some(s) => Err(ApiError::InvalidFlag(s.to_string())),
    }
}

fn parse_optional<T>(raw: Option<String>) -> Result<Option<T>, ParseEnumError>
where
    T: std::str::FromStr<Err = ParseEnumError>,
{
    raw.filter(|s| !s.trim().is_empty())
        .map(|s| s.parse())
        .transpose()
}

async fn search_members(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Member>>, ApiError> {
    let query = params.into_query()?;
    tracing::debug!(?query, "Searching members");
    Ok(Json(state.members.search(query).await))
}

async fn create_member(
    State(state): State<AppState>,
    Json(member): Json<Member>,
) -> Result<impl IntoResponse, ApiError> {
    member.validate()?;
    let created = state.members.create(member).await?;
    let location = format!("/api/members/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

async fn update_member(
    State(state): State<AppState>,
    Path(id): Path<MemberId>,
    Json(member): Json<Member>,
) -> Result<StatusCode, ApiError> {
    if member.id != id {
        return Err(ApiError::IdMismatch);
    }
    member.validate()?;
    if state.members.update(member).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(id))
    }
}

async fn delete_member(
    State(state): State<AppState>,
    Path(id): Path<MemberId>,
) -> Result<StatusCode, ApiError> {
    if state.members.delete(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(id))
    }
}

async fn export_members(State(state): State<AppState>) -> impl IntoResponse {
    let members = state.members.list().await;
    tracing::debug!(count = members.len(), "Exporting members");
    (
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", CSV_FILE_NAME),
            ),
        ],
        render_csv(&members),
    )
}

async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    Ok(Json(state.credentials.login(&request, Utc::now())?))
}

// =============================================================================
// Errors
// =============================================================================

/// Errors surfaced to HTTP clients
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("member not found: {0}")]
    NotFound(MemberId),

    #[error("ID mismatch")]
    IdMismatch,

    #[error(transparent)]
    InvalidMember(#[from] MemberError),

    #[error(transparent)]
    InvalidQuery(#[from] ParseEnumError),

    #[error("invalid and flag: '{0}'")]
    InvalidFlag(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::IdMismatch
            | Self::InvalidMember(_)
            | Self::InvalidQuery(_)
            | Self::InvalidFlag(_)
            | Self::Auth(AuthError::MissingCredentials) => StatusCode::BAD_REQUEST,
            Self::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({ "message": self.to_string() }));
        (status, body).into_response()
    }
}
