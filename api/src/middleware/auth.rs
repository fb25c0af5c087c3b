//! Bearer-token middleware for protected routes.
//!
//! Runs the Auth Gate on the `Authorization` header. Accepted requests carry an
//! `AuthContext` in their extensions; rejected ones get the generic 401 body and
//! never reach the wrapped service.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use ks_core::services::{AuthContext, AuthGate};
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use crate::handlers::unauthorized;

/// Middleware factory holding the gate
#[derive(Clone)]
pub struct JwtAuth {
    gate: AuthGate,
}

impl JwtAuth {
    pub fn new(gate: AuthGate) -> Self {
        Self { gate }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            gate: self.gate.clone(),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    gate: AuthGate,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        match self.gate.authenticate(header) {
            Ok(context) => {
                tracing::debug!(
                    subject = context.subject,
                    token_id = %context.token_id,
                    "Access token accepted"
                );
                req.extensions_mut().insert(context);

                let service = Rc::clone(&self.service);
                Box::pin(async move { Ok(service.call(req).await?.map_into_left_body()) })
            }
            Err(rejection) => {
                tracing::warn!(
                    error_kind = rejection.kind(),
                    path = %req.path(),
                    "Access token rejected"
                );
                let response = req.into_response(unauthorized()).map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}

/// Extractor for the context the middleware attached
///
/// Fails with 401 on routes that are not wrapped in `JwtAuth`.
#[derive(Debug, Clone)]
pub struct Authenticated(pub AuthContext);

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| {
                InternalError::from_response("missing auth context", unauthorized()).into()
            });

        ready(result)
    }
}

impl std::ops::Deref for Authenticated {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
