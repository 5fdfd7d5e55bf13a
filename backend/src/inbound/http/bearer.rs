//! Bearer token gate for protected scopes.
//!
//! [`RequireBearer`] rejects a request with `401` before any handler runs
//! unless its `Authorization` header carries a token the configured
//! [`TokenVerifier`] accepts. Verified claims are stored in the request
//! extensions and surfaced to handlers through [`AuthenticatedUser`].

use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpMessage, HttpRequest, ResponseError};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::ports::{TokenError, TokenVerifier};
use crate::domain::{EmailAddress, Error, IdentityClaims, UserId};

const BEARER_PREFIX: &str = "Bearer ";
const MISSING_TOKEN_MESSAGE: &str = "Authentication token is missing";
const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Middleware factory guarding a scope with bearer authentication.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
/// use actix_web::{App, web};
/// use evstations::domain::ports::TokenVerifier;
/// use evstations::inbound::http::bearer::RequireBearer;
///
/// fn app(tokens: Arc<dyn TokenVerifier>) {
///     let _ = App::new().service(web::scope("/api/stations").wrap(RequireBearer::new(tokens)));
/// }
/// ```
#[derive(Clone)]
pub struct RequireBearer {
    tokens: Arc<dyn TokenVerifier>,
}

impl RequireBearer {
    pub fn new(tokens: Arc<dyn TokenVerifier>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireBearer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequireBearerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireBearerMiddleware {
            service: Rc::new(service),
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

/// Service wrapper produced by [`RequireBearer`].
pub struct RequireBearerMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<dyn TokenVerifier>,
}

impl<S, B> Service<ServiceRequest> for RequireBearerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let tokens = Arc::clone(&self.tokens);
        // Errors are built inside the future so they pick up the trace id.
        Box::pin(async move {
            match authenticate(tokens.as_ref(), req.headers()) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
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

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn authenticate(tokens: &dyn TokenVerifier, headers: &HeaderMap) -> Result<IdentityClaims, Error> {
    let token = bearer_token(headers).ok_or_else(|| Error::unauthorized(MISSING_TOKEN_MESSAGE))?;
    tokens.verify(token).map_err(|err| {
        match &err {
            TokenError::Expired => debug!("rejected expired bearer token"),
            other => debug!(error = %other, "rejected bearer token"),
        }
        Error::unauthorized(INVALID_TOKEN_MESSAGE)
    })
}

/// Identity attached to the request by [`RequireBearer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(IdentityClaims);

impl AuthenticatedUser {
    pub fn id(&self) -> &UserId {
        self.0.subject()
    }

    pub fn email(&self) -> &EmailAddress {
        self.0.email()
    }

    pub fn claims(&self) -> &IdentityClaims {
        &self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Only reachable without claims when a route skipped the gate.
        let claims = req.extensions().get::<IdentityClaims>().cloned();
        ready(
            claims
                .map(AuthenticatedUser)
                .ok_or_else(|| Error::unauthorized(MISSING_TOKEN_MESSAGE)),
        )
    }
}
