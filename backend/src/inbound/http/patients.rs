//! Patient record handlers.
//!
//! The same handlers serve both role scopes; the scope's [`AccessGuard`]
//! decides who gets in:
//!
//! ```text
//! POST   /receptionist/patients
//! GET    /{receptionist|doctor}/patients
//! GET    /{receptionist|doctor}/patients/{id}
//! PUT    /{receptionist|doctor}/patients/{id}
//! DELETE /receptionist/patients/{id}
//! ```
//!
//! Bodies are taken as raw bytes and parsed by the workflow, so an update of
//! a missing record reports 404 even when its body is malformed.
//!
//! [`AccessGuard`]: crate::inbound::http::guard::AccessGuard

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Error, Patient, PatientId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::guard::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, PatientPayloadSchema};
use crate::inbound::http::state::HttpState;

/// Patient record as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PatientResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Asha")]
    pub name: String,
    #[schema(example = 25)]
    pub age: i32,
    #[schema(example = "Female")]
    pub gender: String,
    #[schema(example = "Routine")]
    pub note: String,
}

impl From<Patient> for PatientResponse {
    fn from(value: Patient) -> Self {
        Self {
            id: value.id.get(),
            name: value.name,
            age: value.age,
            gender: value.gender,
            note: value.note,
        }
    }
}

/// Confirmation returned by `DELETE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Patient deleted")]
    pub message: String,
}

/// Path ids that are not integers name no record.
fn parse_id(raw: &str) -> Result<PatientId, Error> {
    PatientId::parse(raw).ok_or_else(|| Error::not_found("Patient not found"))
}

/// Create a patient record. Age is not range-checked here.
#[utoipa::path(
    post,
    path = "/receptionist/patients",
    request_body = PatientPayloadSchema,
    responses(
        (status = 200, description = "Created record", body = PatientResponse),
        (status = 400, description = "Invalid data", body = ErrorSchema),
        (status = 401, description = "Missing, invalid or wrong-role token", body = ErrorSchema),
        (status = 500, description = "Failed to create patient", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "createPatient"
)]
#[post("/patients")]
pub async fn create_patient(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    body: web::Bytes,
) -> ApiResult<web::Json<PatientResponse>> {
    let patient = state.patients.create(&body).await?;
    info!(patient_id = %patient.id, username = %user.username, "patient created");
    Ok(web::Json(patient.into()))
}

/// List every patient record in ascending id order.
#[utoipa::path(
    get,
    path = "/{role}/patients",
    params(("role" = String, Path, description = "`receptionist` or `doctor`")),
    responses(
        (status = 200, description = "All records", body = [PatientResponse]),
        (status = 401, description = "Missing, invalid or wrong-role token", body = ErrorSchema),
        (status = 500, description = "Failed to retrieve patients", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "listPatients"
)]
#[get("/patients")]
pub async fn list_patients(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PatientResponse>>> {
    let patients = state.patients.list().await?;
    Ok(web::Json(patients.into_iter().map(Into::into).collect()))
}

/// Fetch one patient record.
#[utoipa::path(
    get,
    path = "/{role}/patients/{id}",
    params(
        ("role" = String, Path, description = "`receptionist` or `doctor`"),
        ("id" = i64, Path, description = "Patient id")
    ),
    responses(
        (status = 200, description = "The record", body = PatientResponse),
        (status = 401, description = "Missing, invalid or wrong-role token", body = ErrorSchema),
        (status = 404, description = "Patient not found", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "getPatient"
)]
#[get("/patients/{id}")]
pub async fn get_patient(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PatientResponse>> {
    let id = parse_id(&path)?;
    let patient = state.patients.fetch(id).await?;
    Ok(web::Json(patient.into()))
}

/// Overlay the supplied fields onto a record; the result's age must lie in 1..=100.
#[utoipa::path(
    put,
    path = "/{role}/patients/{id}",
    params(
        ("role" = String, Path, description = "`receptionist` or `doctor`"),
        ("id" = i64, Path, description = "Patient id")
    ),
    request_body = PatientPayloadSchema,
    responses(
        (status = 200, description = "Updated record", body = PatientResponse),
        (status = 400, description = "Invalid data or age out of range", body = ErrorSchema),
        (status = 401, description = "Missing, invalid or wrong-role token", body = ErrorSchema),
        (status = 404, description = "Patient not found", body = ErrorSchema),
        (status = 500, description = "Failed to update patient", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "updatePatient"
)]
#[put("/patients/{id}")]
pub async fn update_patient(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<PatientResponse>> {
    let id = parse_id(&path)?;
    let patient = state.patients.update(id, &body).await?;
    info!(patient_id = %id, username = %user.username, role = %user.role, "patient updated");
    Ok(web::Json(patient.into()))
}

/// Delete a patient record.
#[utoipa::path(
    delete,
    path = "/receptionist/patients/{id}",
    params(("id" = i64, Path, description = "Patient id")),
    responses(
        (status = 200, description = "Record deleted", body = MessageResponse),
        (status = 401, description = "Missing, invalid or wrong-role token", body = ErrorSchema),
        (status = 404, description = "Patient not found", body = ErrorSchema),
        (status = 500, description = "Failed to delete patient", body = ErrorSchema)
    ),
    tags = ["patients"],
    operation_id = "deletePatient"
)]
#[delete("/patients/{id}")]
pub async fn delete_patient(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_id(&path)?;
    state.patients.delete(id).await?;
    info!(patient_id = %id, username = %user.username, "patient deleted");
    Ok(web::Json(MessageResponse {
        message: "Patient deleted".to_owned(),
    }))
}
