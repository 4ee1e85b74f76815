//! Role-gated access for patient routes.
//!
//! [`AccessGuard`] wraps a route scope and admits a request only when its
//! `Authorization` header carries a valid token whose role matches the
//! scope's role. The header value is the raw token with no scheme prefix.
//! A role mismatch is reported as 401, the same as a bad token.
//!
//! Admitted requests carry an [`AuthenticatedUser`] in their extensions,
//! which handlers extract directly.

use std::future::{Ready, ready};
use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpMessage, HttpRequest, ResponseError, web};
use futures_util::future::LocalBoxFuture;
use tracing::{debug, error};

use crate::domain::{Error, Role};
use crate::inbound::http::state::HttpState;

const HEADER_MISSING: &str = "Authorization header missing";
const UNAUTHORIZED: &str = "Unauthorized";

/// Identity asserted by a verified token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    pub role: Role,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| Error::unauthorized(UNAUTHORIZED)),
        )
    }
}

/// Middleware factory requiring a specific role.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use portal::domain::Role;
/// use portal::inbound::http::guard::AccessGuard;
///
/// let _app = App::new().service(web::scope("/doctor").wrap(AccessGuard::new(Role::Doctor)));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AccessGuard {
    role: Role,
}

impl AccessGuard {
    /// Guard admitting only tokens issued for `role`.
    pub fn new(role: Role) -> Self {
        Self { role }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AccessGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGuardMiddleware {
            service: Rc::new(service),
            role: self.role,
        }))
    }
}

/// Service wrapper produced by [`AccessGuard`].
pub struct AccessGuardMiddleware<S> {
    service: Rc<S>,
    role: Role,
}

fn authorize(req: &ServiceRequest, required: Role) -> Result<AuthenticatedUser, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| Error::unauthorized(HEADER_MISSING))?;
    let token = header
        .to_str()
        .map_err(|_| Error::unauthorized(UNAUTHORIZED))?;

    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        error!("HttpState missing from app data; access guard cannot validate tokens");
        return Err(Error::internal("Internal server error"));
    };

    let claims = state.tokens.validate(token).map_err(|err| {
        debug!(error = %err, "token rejected");
        Error::unauthorized(UNAUTHORIZED)
    })?;
    if claims.role != required {
        debug!(
            username = %claims.username,
            role = %claims.role,
            required = %required,
            "token role does not match route"
        );
        return Err(Error::unauthorized(UNAUTHORIZED));
    }

    Ok(AuthenticatedUser {
        username: claims.username,
        role: claims.role,
    })
}

impl<S, B> Service<ServiceRequest> for AccessGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let role = self.role;
        // Authorise inside the future so errors pick up the request's trace id.
        Box::pin(async move {
            match authorize(&req, role) {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    let response = err.error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}
