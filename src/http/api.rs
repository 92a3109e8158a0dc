//! JSON API mounted under `/api/v1`.
//!
//! # Responsibilities
//! - Expose each store partition as a collection of JSON documents
//! - Report server status
//!
//! # Design Decisions
//! - The router is built from an opened [`Store`]; there is no other way to
//!   obtain one
//! - Document contents are not validated; the front-end owns their shape

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::observability::metrics;
use crate::store::{Partition, Store};

/// Mount point of the API router.
pub const API_PREFIX: &str = "/api/v1";

#[derive(Serialize)]
pub struct ServerStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub partitions: Vec<PartitionStatus>,
}

#[derive(Serialize)]
pub struct PartitionStatus {
    pub name: &'static str,
    pub entries: usize,
}

#[derive(Serialize)]
pub struct Created {
    pub id: String,
}

/// Build the API router over an opened store.
pub fn router(store: Store) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/{partition}", get(list_entries).post(create_entry))
        .route(
            "/{partition}/{id}",
            get(get_entry).put(put_entry).delete(delete_entry),
        )
        .with_state(store)
}

pub async fn get_status(State(store): State<Store>) -> Json<ServerStatus> {
    let partitions = store
        .partition_names()
        .map(|name| PartitionStatus {
            name,
            entries: store.partition(name).map(Partition::len).unwrap_or(0),
        })
        .collect();

    Json(ServerStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        partitions,
    })
}

pub async fn list_entries(
    State(store): State<Store>,
    Path(partition): Path<String>,
) -> Response {
    let response = match store.partition(&partition) {
        None => unknown_partition(),
        Some(p) => match p.entries() {
            Ok(entries) => (StatusCode::OK, Json(Value::Object(entries))).into_response(),
            Err(e) => storage_failure(&partition, e),
        },
    };
    finish("GET", &store, &partition, response)
}

pub async fn create_entry(
    State(store): State<Store>,
    Path(partition): Path<String>,
    Json(document): Json<Value>,
) -> Response {
    let response = match store.partition(&partition) {
        None => unknown_partition(),
        Some(p) => {
            let id = Uuid::new_v4().to_string();
            match p.put(&id, &document) {
                Ok(_) => (StatusCode::CREATED, Json(Created { id })).into_response(),
                Err(e) => storage_failure(&partition, e),
            }
        }
    };
    finish("POST", &store, &partition, response)
}

pub async fn get_entry(
    State(store): State<Store>,
    Path((partition, id)): Path<(String, String)>,
) -> Response {
    let response = match store.partition(&partition) {
        None => unknown_partition(),
        Some(p) => match p.get(&id) {
            Ok(Some(document)) => (StatusCode::OK, Json(document)).into_response(),
            Ok(None) => (StatusCode::NOT_FOUND, "Entry not found").into_response(),
            Err(e) => storage_failure(&partition, e),
        },
    };
    finish("GET", &store, &partition, response)
}

pub async fn put_entry(
    State(store): State<Store>,
    Path((partition, id)): Path<(String, String)>,
    Json(document): Json<Value>,
) -> Response {
    let response = match store.partition(&partition) {
        None => unknown_partition(),
        Some(p) => match p.put(&id, &document) {
            Ok(true) => (StatusCode::OK, Json(document)).into_response(),
            Ok(false) => (StatusCode::CREATED, Json(document)).into_response(),
            Err(e) => storage_failure(&partition, e),
        },
    };
    finish("PUT", &store, &partition, response)
}

pub async fn delete_entry(
    State(store): State<Store>,
    Path((partition, id)): Path<(String, String)>,
) -> Response {
    let response = match store.partition(&partition) {
        None => unknown_partition(),
        Some(p) => match p.remove(&id) {
            Ok(true) => StatusCode::NO_CONTENT.into_response(),
            Ok(false) => (StatusCode::NOT_FOUND, "Entry not found").into_response(),
            Err(e) => storage_failure(&partition, e),
        },
    };
    finish("DELETE", &store, &partition, response)
}

fn unknown_partition() -> Response {
    (StatusCode::NOT_FOUND, "Unknown partition").into_response()
}

fn storage_failure(partition: &str, error: crate::store::StoreError) -> Response {
    tracing::error!(partition = %partition, error = %error, "Store operation failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "Storage failure").into_response()
}

fn finish(method: &'static str, store: &Store, partition: &str, response: Response) -> Response {
    let label = metric_label(store, partition);
    metrics::record_api_request(method, label, response.status().as_u16());
    response
}

/// Metric label for a requested partition. Names outside the opened set all
/// collapse to `"unknown"` so clients cannot mint new series.
fn metric_label(store: &Store, partition: &str) -> &'static str {
    store
        .partition_names()
        .find(|name| *name == partition)
        .unwrap_or("unknown")
}
