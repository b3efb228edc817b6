//! Customer route handlers.
//!
//! Each handler issues exactly one store call. Failures go through the
//! state's [`ErrorPolicy`](crate::error::ErrorPolicy), so the configured
//! [`ErrorMode`] decides the status code.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use customer_rest_core::CustomerId;

use crate::error::{AppError, ErrorMode, Result, Scope};
use crate::models::customer::{
    CreatedCustomer, Customer, CustomerBody, CustomerPayload, ListQuery, NewCustomer,
};
use crate::state::AppState;

/// Create a customer.
///
/// Responds with the store-generated `customer_id`.
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CustomerBody>, JsonRejection>,
) -> Result<Json<CreatedCustomer>> {
    let policy = state.policy(Scope::Customer);
    let payload = accept_payload(state.error_mode(), payload).map_err(|e| policy.reject(e))?;

    let customer_id = state
        .store()
        .create(&payload)
        .await
        .map_err(|e| policy.reject(e))?;

    tracing::info!(%customer_id, "customer created");
    Ok(Json(CreatedCustomer { customer_id }))
}

/// Get a customer by ID.
///
/// Responds with an array of zero or one rows. In strict mode an absent row
/// is a 404 instead of an empty array.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Customer>>> {
    let policy = state.policy(Scope::Customer);
    let id = parse_id(&id).map_err(|e| policy.reject(e))?;

    let customer = state.store().get(id).await.map_err(|e| policy.reject(e))?;

    match customer {
        Some(customer) => Ok(Json(vec![customer])),
        None if state.error_mode().is_strict() => Err(policy.reject(AppError::NotFound)),
        None => Ok(Json(Vec::new())),
    }
}

/// Replace a customer's mutable fields.
///
/// Responds with the updated row. When no row matches, legacy mode responds
/// 200 with an empty body and strict mode responds 404.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<CustomerBody>, JsonRejection>,
) -> Result<Response> {
    let policy = state.policy(Scope::Customer);
    let id = parse_id(&id).map_err(|e| policy.reject(e))?;
    let payload = accept_payload(state.error_mode(), payload).map_err(|e| policy.reject(e))?;

    let updated = state
        .store()
        .update(id, &payload)
        .await
        .map_err(|e| policy.reject(e))?;

    match updated {
        Some(customer) => {
            tracing::info!(customer_id = %customer.customer_id, "customer updated");
            Ok(Json(customer).into_response())
        }
        None if state.error_mode().is_strict() => Err(policy.reject(AppError::NotFound)),
        None => Ok(StatusCode::OK.into_response()),
    }
}

/// Delete a customer.
///
/// Responds with the requested ID as plain text. In strict mode an absent
/// row is a 404.
pub async fn delete(State(state): State<AppState>, Path(raw_id): Path<String>) -> Result<String> {
    let policy = state.policy(Scope::Customer);
    let id = parse_id(&raw_id).map_err(|e| policy.reject(e))?;

    let deleted = state
        .store()
        .delete(id)
        .await
        .map_err(|e| policy.reject(e))?;

    match deleted {
        Some(customer_id) => {
            tracing::info!(%customer_id, "customer deleted");
            Ok(raw_id)
        }
        None if state.error_mode().is_strict() => Err(policy.reject(AppError::NotFound)),
        None => Ok(raw_id),
    }
}

/// List customers, most recently updated first.
///
/// `limit` and `offset` are optional; absent values mean no limit and no offset.
pub async fn list(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<Customer>>> {
    let policy = state.policy(Scope::Collection);
    let Query(query) = query
        .map_err(|rejection| policy.reject(AppError::BadRequest(rejection.body_text())))?;
    let page = query
        .page()
        .map_err(|e| policy.reject(AppError::BadRequest(e.to_string())))?;

    let customers = state.store().list(page).await.map_err(|e| policy.reject(e))?;

    tracing::debug!(count = customers.len(), ?page, "customers listed");
    Ok(Json(customers))
}

/// Parse a path segment into a customer ID.
fn parse_id(raw: &str) -> std::result::Result<CustomerId, AppError> {
    raw.parse::<CustomerId>()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Unwrap the JSON body.
///
/// Legacy mode binds each field's text form whatever its JSON type; strict
/// mode requires strings, then validates and normalizes them.
fn accept_payload(
    mode: ErrorMode,
    body: std::result::Result<Json<CustomerBody>, JsonRejection>,
) -> std::result::Result<CustomerPayload, AppError> {
    let Json(body) = body.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    if mode.is_strict() {
        Ok(NewCustomer::try_from(body.into_strings()?)?.into())
    } else {
        Ok(body.into_text())
    }
}
