//! Session authentication for the admin API
//!
//! A valid session cookie yields a [`Principal`] in the request extensions;
//! handlers receive it through the `Principal` extractor.

use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    error::InternalError,
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{info, trace};

use crate::api::constants::{PUBLIC_API_PATHS, SESSION_COOKIE_NAME};
use crate::api::services::admin::{ErrorCode, error_response};
use crate::api::session::SessionService;
use crate::services::Principal;

/// Admin authentication middleware
#[derive(Clone)]
pub struct AdminAuth {
    sessions: Arc<SessionService>,
}

impl AdminAuth {
    pub fn new(sessions: Arc<SessionService>) -> Self {
        Self { sessions }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddleware {
            service: Rc::new(service),
            sessions: Arc::clone(&self.sessions),
        }))
    }
}

pub struct AdminAuthMiddleware<S> {
    service: Rc<S>,
    sessions: Arc<SessionService>,
}

fn unauthorized_response() -> HttpResponse {
    error_response(
        StatusCode::UNAUTHORIZED,
        ErrorCode::Unauthorized,
        "Unauthorized: missing or invalid session",
    )
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let sessions = Arc::clone(&self.sessions);

        Box::pin(async move {
            if PUBLIC_API_PATHS.contains(&req.path()) {
                trace!("Public endpoint {} - bypassing authentication", req.path());
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            let token = req.cookie(SESSION_COOKIE_NAME).map(|c| c.value().to_string());
            let principal = match token {
                Some(token) => match sessions.validate(&token) {
                    Ok(principal) => Some(principal),
                    Err(e) => {
                        info!("Session validation failed: {}", e);
                        None
                    }
                },
                None => None,
            };

            match principal {
                Some(principal) => {
                    trace!("Authenticated request from {}", principal.username);
                    req.extensions_mut().insert(principal);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                None => Ok(req.into_response(unauthorized_response().map_into_right_body())),
            }
        })
    }
}

impl FromRequest for Principal {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let principal = req.extensions().get::<Principal>().cloned();
        ready(principal.ok_or_else(|| {
            InternalError::from_response("unauthenticated", unauthorized_response()).into()
        }))
    }
}
