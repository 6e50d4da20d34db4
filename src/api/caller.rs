//! Caller identity extraction.
//!
//! Authentication happens upstream; the authenticated user id and role arrive
//! in the `x-user-id` and `x-user-role` headers. Requests missing either
//! header, or carrying values that do not parse, are rejected with 401.

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::access::{Actor, Role};

use super::response::ApiErrorResponse;

/// Header carrying the authenticated user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the authenticated user's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Actor);

fn header<'a>(parts: &'a Parts, name: &str) -> Result<&'a str, ApiErrorResponse> {
    parts
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiErrorResponse::unauthorized(format!("missing header: {}", name)))
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let parts = &*parts;
        let resolved = header(parts, USER_ID_HEADER).and_then(|raw_id| {
            let user_id = raw_id.trim().parse::<u64>().map_err(|_| {
                ApiErrorResponse::unauthorized(format!("invalid {}: {}", USER_ID_HEADER, raw_id))
            })?;
            let role = header(parts, USER_ROLE_HEADER)?
                .parse::<Role>()
                .map_err(ApiErrorResponse::unauthorized)?;
            Ok(Actor { user_id, role })
        });

        match resolved {
            Ok(actor) => Ok(Caller(actor)),
            Err(rejection) => {
                warn!(
                    path = %parts.uri.path(),
                    error = %rejection.error.message,
                    "Rejected request without caller identity"
                );
                Err(rejection)
            }
        }
    }
}
