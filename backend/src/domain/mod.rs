//! Domain primitives, ports and services.
//!
//! Purpose: Define strongly typed entities used by the HTTP and persistence
//! adapters, and the services that implement the driving ports. Types
//! document their invariants and serialisation contracts in their Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic error payload.
//! - User / Role: account identity and access role.
//! - Patient / PatientPayload: patient records and client-supplied fields.
//! - CredentialService / PatientService: driving port implementations.

pub mod auth;
mod credential_service;
pub mod error;
pub mod patient;
mod patient_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AccessToken, CredentialsValidationError, LoginCredentials, Registration, TokenClaims,
};
pub use self::credential_service::CredentialService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::patient::{
    PATIENT_AGE_RANGE, Patient, PatientDraft, PatientId, PatientPayload, PatientValidationError,
    validate_age,
};
pub use self::patient_service::PatientService;
pub use self::trace_id::TraceId;
pub use self::user::{NewUser, PasswordHash, Role, UnknownRoleError, User, UserId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use portal::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Unauthorized"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
