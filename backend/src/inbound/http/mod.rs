//! HTTP inbound adapter exposing REST endpoints.
//!
//! [`configure`] mounts the account endpoints, the two role scopes and the
//! health probes. The caller provides `web::Data<HttpState>` and
//! `web::Data<HealthState>`.

pub mod error;
pub mod guard;
pub mod health;
pub mod patients;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

use actix_web::web;
use serde_json::json;

use crate::domain::{Error, Role};
use guard::AccessGuard;

/// JSON extractor settings: malformed account bodies are `400 Invalid data`.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        Error::invalid_request("Invalid data")
            .with_details(json!({ "reason": err.to_string() }))
            .into()
    })
}

/// Register every route on `cfg`.
///
/// # Examples
/// ```no_run
/// use actix_web::App;
/// use portal::inbound::http::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(users::register)
        .service(users::login)
        .service(health::ready)
        .service(health::live)
        .service(
            web::scope("/receptionist")
                .wrap(AccessGuard::new(Role::Receptionist))
                .service(patients::create_patient)
                .service(patients::list_patients)
                .service(patients::get_patient)
                .service(patients::update_patient)
                .service(patients::delete_patient),
        )
        .service(
            web::scope("/doctor")
                .wrap(AccessGuard::new(Role::Doctor))
                .service(patients::list_patients)
                .service(patients::get_patient)
                .service(patients::update_patient),
        );
}
