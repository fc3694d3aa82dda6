//! HTTP server for the chatbot and the shelter registry.
//!
//! API endpoints:
//! - POST   /api/chat                                  - Chatbot reply {response, intent, species}
//! - GET    /api/chat/history?user=                    - Chat log, newest first
//! - DELETE /api/chat/history?user=                    - Clear a user's chat log
//! - GET    /api/pets?type=                            - Available pets
//! - POST   /api/pets                                  - List a new pet
//! - DELETE /api/pets/{id}                             - Remove a pet
//! - PUT    /api/pets/{id}/status                      - Set a pet's listing status
//! - POST   /api/pets/{id}/adopt                       - Request an adoption
//! - POST   /api/adoptions/{id}/cancel                 - Withdraw a pending request
//! - POST   /api/adoptions/{id}/review                 - Approve or reject a request
//! - GET    /api/users/{user}/dashboard                - Adoptions and reminders overview
//! - GET    /api/users/{user}/pets                     - Pets the user has adopted
//! - GET    /api/users/{user}/reminders                - Reminders by due time
//! - POST   /api/users/{user}/reminders                - Create a reminder
//! - PUT    /api/users/{user}/reminders/{id}           - Update a reminder
//! - DELETE /api/users/{user}/reminders/{id}           - Delete a reminder
//! - POST   /api/users/{user}/reminders/{id}/complete  - Mark a reminder done
//! - GET    /healthz                                   - Liveness

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{delete, get, post, put},
    Router,
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use petcare_chatbot::{Chatbot, Species};
use petcare_shelter::{
    Adoption, AdoptionId, ChatQuery, Dashboard, Decision, NewPet, NewReminder, Pet, PetId,
    PetKind, PetStatus, Reminder, ReminderId, ReminderUpdate, Shelter, ShelterError,
};

/// Shared server state.
#[derive(Clone)]
pub struct AppState {
    bot: Arc<Chatbot>,
    shelter: Arc<RwLock<Shelter>>,
    /// Local wall-clock time used to bucket reminders.
    now: fn() -> NaiveDateTime,
}

impl AppState {
    pub fn new(bot: Arc<Chatbot>, shelter: Shelter) -> Self {
        Self {
            bot,
            shelter: Arc::new(RwLock::new(shelter)),
            now: local_now,
        }
    }
}

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Start the HTTP server.
pub async fn start_server(addr: &str, bot: Arc<Chatbot>, shelter: Shelter) -> Result<()> {
    let app = router(AppState::new(bot, shelter));

    let addr = parse_addr(addr)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server started");
    println!("Server started at http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/chat", post(chat))
        .route("/api/chat/history", get(chat_history).delete(clear_chat_history))
        .route("/api/pets", get(list_pets).post(create_pet))
        .route("/api/pets/{id}", delete(remove_pet))
        .route("/api/pets/{id}/status", put(set_pet_status))
        .route("/api/pets/{id}/adopt", post(request_adoption))
        .route("/api/adoptions/{id}/cancel", post(cancel_adoption))
        .route("/api/adoptions/{id}/review", post(review_adoption))
        .route("/api/users/{user}/dashboard", get(dashboard))
        .route("/api/users/{user}/pets", get(adopted_pets))
        .route("/api/users/{user}/reminders", get(list_reminders).post(create_reminder))
        .route(
            "/api/users/{user}/reminders/{id}",
            put(update_reminder).delete(delete_reminder),
        )
        .route("/api/users/{user}/reminders/{id}/complete", post(complete_reminder))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Parse address string to SocketAddr. A leading `:` binds all interfaces.
fn parse_addr(addr: &str) -> Result<SocketAddr> {
    let addr = if addr.starts_with(':') {
        format!("0.0.0.0{}", addr)
    } else {
        addr.to_string()
    };
    Ok(addr.parse()?)
}

// Errors

/// Error response with a JSON `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
        }
    }
}

impl From<ShelterError> for ApiError {
    fn from(err: ShelterError) -> Self {
        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else if err.is_conflict() {
            StatusCode::CONFLICT
        } else if matches!(err, ShelterError::PetNotOwned { .. }) {
            StatusCode::FORBIDDEN
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, error = %self.message, "request rejected");
        (self.status, Json(serde_json::json!({ "error": self.message }))).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

fn require_user(user: &str) -> std::result::Result<&str, ApiError> {
    let user = user.trim();
    if user.is_empty() {
        return Err(ApiError::validation("user is required"));
    }
    Ok(user)
}

// Chat

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
    intent: Option<String>,
    species: Species,
}

#[derive(Debug, Deserialize)]
struct UserQuery {
    #[serde(default)]
    user: Option<String>,
}

async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> ApiResult<ChatResponse> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(ApiError::validation("message is required"));
    }

    let reply = state.bot.respond(message);
    state.shelter.write().await.record_chat(
        req.user.as_deref(),
        req.session_id.as_deref(),
        message,
        &reply.text,
    );

    Ok(Json(ChatResponse {
        response: reply.text,
        intent: reply.intent,
        species: reply.species,
    }))
}

async fn chat_history(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> ApiResult<Vec<ChatQuery>> {
    let shelter = state.shelter.read().await;
    Ok(Json(shelter.chat_history(query.user.as_deref())))
}

async fn clear_chat_history(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> ApiResult<serde_json::Value> {
    let removed = state.shelter.write().await.clear_chat(query.user.as_deref());
    Ok(Json(serde_json::json!({ "removed": removed })))
}

// Pets

#[derive(Debug, Deserialize)]
struct PetsQuery {
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

async fn list_pets(
    State(state): State<AppState>,
    Query(query): Query<PetsQuery>,
) -> ApiResult<Vec<Pet>> {
    let kind = match query.kind.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(s) => Some(s.parse::<PetKind>()?),
    };
    let shelter = state.shelter.read().await;
    Ok(Json(shelter.available_pets(kind)))
}

async fn create_pet(
    State(state): State<AppState>,
    Json(new): Json<NewPet>,
) -> std::result::Result<(StatusCode, Json<Pet>), ApiError> {
    let pet = state.shelter.write().await.add_pet(new)?;
    Ok((StatusCode::CREATED, Json(pet)))
}

async fn remove_pet(State(state): State<AppState>, Path(id): Path<PetId>) -> ApiResult<Pet> {
    Ok(Json(state.shelter.write().await.remove_pet(id)?))
}

#[derive(Debug, Deserialize)]
struct StatusBody {
    status: PetStatus,
}

async fn set_pet_status(
    State(state): State<AppState>,
    Path(id): Path<PetId>,
    Json(body): Json<StatusBody>,
) -> ApiResult<Pet> {
    Ok(Json(state.shelter.write().await.set_pet_status(id, body.status)?))
}

// Adoptions

#[derive(Debug, Deserialize)]
struct UserBody {
    user: String,
}

#[derive(Debug, Deserialize)]
struct ReviewBody {
    decision: Decision,
    #[serde(default)]
    notes: Option<String>,
}

async fn request_adoption(
    State(state): State<AppState>,
    Path(pet_id): Path<PetId>,
    Json(body): Json<UserBody>,
) -> std::result::Result<(StatusCode, Json<Adoption>), ApiError> {
    let user = require_user(&body.user)?;
    let adoption = state.shelter.write().await.request_adoption(user, pet_id)?;
    Ok((StatusCode::CREATED, Json(adoption)))
}

async fn cancel_adoption(
    State(state): State<AppState>,
    Path(id): Path<AdoptionId>,
    Json(body): Json<UserBody>,
) -> ApiResult<Adoption> {
    let user = require_user(&body.user)?;
    Ok(Json(state.shelter.write().await.cancel_adoption(user, id)?))
}

async fn review_adoption(
    State(state): State<AppState>,
    Path(id): Path<AdoptionId>,
    Json(body): Json<ReviewBody>,
) -> ApiResult<Adoption> {
    let mut shelter = state.shelter.write().await;
    Ok(Json(shelter.review_adoption(id, body.decision, body.notes)?))
}

// Users

async fn dashboard(State(state): State<AppState>, Path(user): Path<String>) -> ApiResult<Dashboard> {
    let shelter = state.shelter.read().await;
    Ok(Json(shelter.dashboard(&user, (state.now)())))
}

async fn adopted_pets(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> ApiResult<Vec<Pet>> {
    let shelter = state.shelter.read().await;
    Ok(Json(shelter.adopted_pets(&user)))
}

async fn list_reminders(
    State(state): State<AppState>,
    Path(user): Path<String>,
) -> ApiResult<Vec<Reminder>> {
    let shelter = state.shelter.read().await;
    Ok(Json(shelter.reminders_for(&user)))
}

async fn create_reminder(
    State(state): State<AppState>,
    Path(user): Path<String>,
    Json(new): Json<NewReminder>,
) -> std::result::Result<(StatusCode, Json<Reminder>), ApiError> {
    let user = require_user(&user)?;
    let reminder = state.shelter.write().await.add_reminder(user, new)?;
    Ok((StatusCode::CREATED, Json(reminder)))
}

async fn update_reminder(
    State(state): State<AppState>,
    Path((user, id)): Path<(String, ReminderId)>,
    Json(update): Json<ReminderUpdate>,
) -> ApiResult<Reminder> {
    let mut shelter = state.shelter.write().await;
    Ok(Json(shelter.update_reminder(&user, id, update)?))
}

async fn delete_reminder(
    State(state): State<AppState>,
    Path((user, id)): Path<(String, ReminderId)>,
) -> ApiResult<Reminder> {
    Ok(Json(state.shelter.write().await.delete_reminder(&user, id)?))
}

async fn complete_reminder(
    State(state): State<AppState>,
    Path((user, id)): Path<(String, ReminderId)>,
) -> ApiResult<Reminder> {
    Ok(Json(state.shelter.write().await.complete_reminder(&user, id)?))
}
