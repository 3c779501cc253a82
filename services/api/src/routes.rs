use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use domain::{
    medications::{MedicationChanges, MedicationDetail, MedicationSummary, NewMedication},
    patients::{NewPatient, PatientChanges, PatientSummary},
    Store,
};
use serde_json::{json, Value};
use tracing::Instrument;
use ulid::Ulid;

use crate::{
    error::ApiError,
    extract::{Ids, Payload},
};

#[derive(Clone)]
pub struct AppState {
    store: Arc<Box<dyn Store>>,
}

impl AppState {
    pub fn new(store: Arc<Box<dyn Store>>) -> Self {
        Self { store }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/patients", get(list_patients).post(create_patient))
        .route("/medications", get(list_medications))
        .route(
            "/patients/:id",
            get(get_patient)
                .post(create_medication)
                .put(update_patient)
                .delete(delete_patient),
        )
        .route(
            "/patients/:id/:medication_id",
            get(get_medication)
                .put(update_medication)
                .delete(delete_medication),
        )
        .layer(tower::ServiceBuilder::new().layer(middleware::from_fn(trace_request)))
        .with_state(state)
}

// Wraps each request in a span tagged with a fresh request id
async fn trace_request(request: Request, next: Next) -> Response {
    let span = tracing::info_span!(
        "request",
        request_id = %Ulid::new(),
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        let response = next.run(request).await;
        tracing::info!(status = response.status().as_u16(), "Handled");
        response
    }
    .instrument(span)
    .await
}

fn successful() -> Json<Value> {
    Json(json!({ "message": "successful" }))
}

async fn index() -> &'static str {
    "Hello"
}

// List patients
async fn list_patients(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let patients: Vec<PatientSummary> = state
        .store
        .list_patients()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(json!({ "patients": patients })))
}

// Get patient
async fn get_patient(
    Ids(id): Ids<i64>,
    State(state): State<AppState>,
) -> Result<Json<PatientSummary>, ApiError> {
    let patient = state.store.get_patient(id).await?;
    Ok(Json(patient.into()))
}

// Create patient
async fn create_patient(
    State(state): State<AppState>,
    Payload(input): Payload<NewPatient>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.store.create_patient(input).await?;
    tracing::info!(patient_id = id, "Patient created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "successful", "id": id })),
    ))
}

// Update patient
async fn update_patient(
    Ids(id): Ids<i64>,
    State(state): State<AppState>,
    Payload(changes): Payload<PatientChanges>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.update_patient(id, changes).await?;
    tracing::info!(patient_id = id, "Patient updated");

    Ok(successful())
}

// Delete patient
async fn delete_patient(
    Ids(id): Ids<i64>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete_patient(id).await?;
    tracing::info!(patient_id = id, "Patient deleted");

    Ok(successful())
}

// List medications
async fn list_medications(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let medications: Vec<MedicationSummary> = state
        .store
        .list_medications()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(json!({ "medications": medications })))
}

// Get medication; the patient segment is not checked against the owner
async fn get_medication(
    Ids((_patient_id, medication_id)): Ids<(i64, i64)>,
    State(state): State<AppState>,
) -> Result<Json<MedicationDetail>, ApiError> {
    let medication = state.store.get_medication(medication_id).await?;
    Ok(Json(medication.into()))
}

// Create medication for a patient
async fn create_medication(
    Ids(patient_id): Ids<i64>,
    State(state): State<AppState>,
    Payload(input): Payload<NewMedication>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.store.create_medication(patient_id, input).await?;
    tracing::info!(patient_id, medication_id = id, "Medication created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "successful", "id": id })),
    ))
}

// Update medication
async fn update_medication(
    Ids((_patient_id, medication_id)): Ids<(i64, i64)>,
    State(state): State<AppState>,
    Payload(changes): Payload<MedicationChanges>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.update_medication(medication_id, changes).await?;
    tracing::info!(medication_id, "Medication updated");

    Ok(successful())
}

// Delete medication
async fn delete_medication(
    Ids((_patient_id, medication_id)): Ids<(i64, i64)>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    state.store.delete_medication(medication_id).await?;
    tracing::info!(medication_id, "Medication deleted");

    Ok(successful())
}
