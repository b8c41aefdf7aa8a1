use crate::config::Config;
use crate::dispatch::dispatch;
use crate::http::envelope::Envelope;
use crate::registry::{RegistryClient, RegistryError};
use axum::extract::{Path, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared, read-only state handed to every handler. Cheap to clone (two
/// `Arc`s); no handler ever needs `&mut` access to either field.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: Arc<dyn RegistryClient>,
}

/// Builds the backend's router: the two PowerDNS remote-backend endpoints
/// plus `/healthz`. `/metrics` is layered on separately in `main`, since it
/// wraps every route rather than being one itself (§4.7).
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/dnsapi/lookup/{qname}/{qtype}", get(lookup))
        .route("/dnsapi/getDomainMetadata/{qname}/{qkind}", get(get_domain_metadata))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn lookup(
    State(state): State<AppState>,
    Path((qname, qtype)): Path<(String, String)>,
) -> Result<Json<Envelope>, RegistryError> {
    log::info!("[{}] lookup {} {}", qname, qname, qtype);

    let registry = state.registry.clone();
    let config = state.config.clone();
    let qname_for_task = qname.clone();
    let records = tokio::task::spawn_blocking(move || dispatch(registry.as_ref(), &config, &qname_for_task, &qtype))
        .await
        .expect("dispatch task panicked")?;

    log::debug!("[{}] {} record(s)", qname, records.len());
    Ok(Json(Envelope::from_records(records)))
}

/// `getDomainMetadata`'s `result` is a bare array of strings, not of answer
/// records, so it gets its own tiny envelope rather than reusing
/// [`Envelope`].
async fn get_domain_metadata(Path((qname, qkind)): Path<(String, String)>) -> Json<Value> {
    log::debug!("[{}] getDomainMetadata {}", qname, qkind);
    if qkind == "SOA-EDIT" {
        Json(json!({ "result": ["EPOCH"] }))
    } else {
        Json(serde_json::to_value(Envelope::no_answer()).expect("envelope serializes"))
    }
}

async fn healthz() -> &'static str {
    ""
}
