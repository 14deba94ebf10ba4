//! # REST API
//!
//! Builds the axum router that exposes the token node's HTTP interface.
//! All endpoints share application state through axum's `State` extractor.
//!
//! ## Endpoints
//!
//! | Method | Path                 | Description                            |
//! |--------|----------------------|----------------------------------------|
//! | GET    | `/health`            | Liveness probe                         |
//! | GET    | `/status`            | Token instance summary                 |
//! | GET    | `/supply`            | Total supply                           |
//! | GET    | `/accounts/:address` | Balance, backup, blacklist flag        |
//! | GET    | `/events`            | Full event journal                     |
//! | POST   | `/transfer`          | Direct transfer                        |
//! | POST   | `/transfer-from`     | Delegated transfer against an approval |
//! | POST   | `/approve`           | Set an approval                        |
//! | POST   | `/register-backup`   | One-shot backup designation            |
//! | POST   | `/recover`           | Execute a signed recovery claim        |
//!
//! Caller identity on mutating endpoints is asserted in the request body.
//! This is a devnet trust model: there is no transaction signing on the
//! transfer paths, only on recovery claims.

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use backup_token::address::Address;
use backup_token::events::TokenEvent;
use backup_token::{BackupToken, RecoverableSignature, TokenError};

// ---------------------------------------------------------------------------
// Application State
// ---------------------------------------------------------------------------

/// Shared application state available to all request handlers.
///
/// Cheap to clone. The token sits behind a `parking_lot::RwLock`; every
/// mutating handler takes the write lock for the full operation, which
/// is what makes each operation atomic from the API's point of view.
#[derive(Clone)]
pub struct AppState {
    /// The node's reported version string.
    pub version: String,
    /// The hosted token instance.
    pub token: Arc<RwLock<BackupToken>>,
}

// ---------------------------------------------------------------------------
// Router Construction
// ---------------------------------------------------------------------------

/// Builds the full axum [`Router`] with all API routes, CORS, and tracing.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/status", get(status_handler))
        .route("/supply", get(supply_handler))
        .route("/accounts/:address", get(account_handler))
        .route("/events", get(events_handler))
        .route("/transfer", post(transfer_handler))
        .route("/transfer-from", post(transfer_from_handler))
        .route("/approve", post(approve_handler))
        .route("/register-backup", post(register_backup_handler))
        .route("/recover", post(recover_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response Types
// ---------------------------------------------------------------------------

/// Response payload for `GET /status`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Node software version.
    pub version: String,
    /// The token instance address claims are bound to.
    pub token_address: String,
    /// Chain identifier in the signing domain.
    pub chain_id: u64,
    /// Total minted supply.
    pub total_supply: u64,
    /// Number of journaled events.
    pub event_count: usize,
    /// ISO-8601 timestamp of the response.
    pub timestamp: String,
}

/// Response payload for `GET /accounts/:address`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    /// Hex-encoded account address.
    pub address: String,
    /// Balance held by this account.
    pub balance: u64,
    /// Registered backup address, if any.
    pub backup: Option<String>,
    /// Whether the account has been recovered and is now redirected.
    pub blacklisted: bool,
}

/// Request body for `POST /transfer`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub amount: u64,
}

/// Request body for `POST /transfer-from`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransferFromRequest {
    /// The approved spender submitting the transfer.
    pub caller: String,
    pub from: String,
    pub to: String,
    pub amount: u64,
}

/// Response payload for both transfer endpoints.
///
/// `credited` can differ from `to` when the nominal recipient has been
/// recovered and the credit was redirected to its backup.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransferResponse {
    pub from: String,
    pub to: String,
    pub credited: String,
    pub amount: u64,
}

/// Request body for `POST /approve`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApproveRequest {
    pub owner: String,
    pub spender: String,
    pub amount: u64,
}

/// Request body for `POST /register-backup`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterBackupRequest {
    pub recoveree: String,
    pub backup: String,
}

/// Request body for `POST /recover`: the claim signature split into its
/// recoverable-ECDSA components, hex-encoded.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecoverRequest {
    pub recoveree: String,
    /// Account submitting the claim. Any address may submit.
    pub caller: String,
    pub v: u8,
    pub r: String,
    pub s: String,
}

/// Response payload for `POST /recover`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecoverResponse {
    pub who: String,
    pub recoveree: String,
    pub backup: String,
    pub amount: u64,
}

/// Generic error body returned by REST endpoints on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Error Mapping
// ---------------------------------------------------------------------------

/// Anything a handler can reject: a malformed request field or a domain
/// error from the token core. Both map to 400 with the display string —
/// the core taxonomy is already phrased for humans.
enum ApiError {
    BadRequest(String),
}

impl ApiError {
    fn bad(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let ApiError::BadRequest(error) = self;
        (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
    }
}

/// Parses a hex address out of a request field, naming the field in the
/// error so the client knows which one was malformed.
fn parse_address(field: &str, value: &str) -> Result<Address, ApiError> {
    Address::from_hex(value).map_err(|e| ApiError::bad(format!("{}: {}", field, e)))
}

/// Parses a hex-encoded 32-byte scalar out of a request field.
fn parse_scalar(field: &str, value: &str) -> Result<[u8; 32], ApiError> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(stripped)
        .map_err(|e| ApiError::bad(format!("{}: invalid hex: {}", field, e)))?;
    bytes
        .try_into()
        .map_err(|_| ApiError::bad(format!("{}: expected 32 bytes", field)))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// `GET /health` — returns 200 if the node is alive.
///
/// This is the liveness probe for orchestrators. It intentionally does
/// not inspect the token instance; that belongs in `/status`.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

/// `GET /status` — returns a summary of the hosted token instance.
async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let token = state.token.read();
    let snapshot = token.snapshot();

    Json(StatusResponse {
        version: state.version.clone(),
        token_address: snapshot.address.to_string(),
        chain_id: snapshot.chain_id,
        total_supply: snapshot.total_supply,
        event_count: snapshot.event_count,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// `GET /supply` — returns the total minted supply.
async fn supply_handler(State(state): State<AppState>) -> impl IntoResponse {
    let total_supply = state.token.read().total_supply();
    Json(serde_json::json!({ "total_supply": total_supply }))
}

/// `GET /accounts/:address` — balance, backup assignment, and blacklist
/// flag for one account. Unknown addresses report a zero balance rather
/// than 404; every address is a valid account on a fungible ledger.
async fn account_handler(
    Path(address): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = parse_address("address", &address)?;
    let token = state.token.read();

    Ok(Json(AccountResponse {
        address: account.to_string(),
        balance: token.balance_of(&account),
        backup: token.backups(&account).map(|a| a.to_string()),
        blacklisted: token.blacklisted(&account),
    }))
}

/// `GET /events` — the full event journal, oldest first.
async fn events_handler(State(state): State<AppState>) -> Json<Vec<TokenEvent>> {
    Json(state.token.read().events().to_vec())
}

/// `POST /transfer` — moves funds from `from` to `to`, with the redirect
/// applied if `to` has been recovered.
async fn transfer_handler(
    State(state): State<AppState>,
    Json(req): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, ApiError> {
    let from = parse_address("from", &req.from)?;
    let to = parse_address("to", &req.to)?;

    let credited = state.token.write().transfer(from, to, req.amount)?;
    Ok(Json(TransferResponse {
        from: from.to_string(),
        to: to.to_string(),
        credited: credited.to_string(),
        amount: req.amount,
    }))
}

/// `POST /transfer-from` — delegated transfer against an approval.
async fn transfer_from_handler(
    State(state): State<AppState>,
    Json(req): Json<TransferFromRequest>,
) -> Result<Json<TransferResponse>, ApiError> {
    let caller = parse_address("caller", &req.caller)?;
    let from = parse_address("from", &req.from)?;
    let to = parse_address("to", &req.to)?;

    let credited = state
        .token
        .write()
        .transfer_from(caller, from, to, req.amount)?;
    Ok(Json(TransferResponse {
        from: from.to_string(),
        to: to.to_string(),
        credited: credited.to_string(),
        amount: req.amount,
    }))
}

/// `POST /approve` — sets the owner's approval for a spender.
async fn approve_handler(
    State(state): State<AppState>,
    Json(req): Json<ApproveRequest>,
) -> Result<StatusCode, ApiError> {
    let owner = parse_address("owner", &req.owner)?;
    let spender = parse_address("spender", &req.spender)?;

    state.token.write().approve(owner, spender, req.amount);
    Ok(StatusCode::OK)
}

/// `POST /register-backup` — one-shot backup designation.
async fn register_backup_handler(
    State(state): State<AppState>,
    Json(req): Json<RegisterBackupRequest>,
) -> Result<StatusCode, ApiError> {
    let recoveree = parse_address("recoveree", &req.recoveree)?;
    let backup = parse_address("backup", &req.backup)?;

    state.token.write().register_backup(recoveree, backup)?;
    Ok(StatusCode::OK)
}

/// `POST /recover` — executes a signed recovery claim.
async fn recover_handler(
    State(state): State<AppState>,
    Json(req): Json<RecoverRequest>,
) -> Result<Json<RecoverResponse>, ApiError> {
    let recoveree = parse_address("recoveree", &req.recoveree)?;
    let caller = parse_address("caller", &req.caller)?;
    let signature = RecoverableSignature {
        v: req.v,
        r: parse_scalar("r", &req.r)?,
        s: parse_scalar("s", &req.s)?,
    };

    let receipt = state.token.write().recover(&signature, recoveree, caller)?;
    Ok(Json(RecoverResponse {
        who: receipt.who.to_string(),
        recoveree: receipt.recoveree.to_string(),
        backup: receipt.backup.to_string(),
        amount: receipt.amount,
    }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
