use actix_web::{web, HttpResponse};
use validator::Validate;

use ks_core::repositories::{IdentityStore, RevocationLedger};

use crate::dto::{LoginRequest, TokenPairResponse};
use crate::handlers::{handle_domain_error, unauthorized};
use crate::routes::AppState;

/// Handler for POST /login
///
/// Exchanges a username and password for a fresh token pair.
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "access_expires_at": "2024-01-01T00:15:00Z",
///     "refresh_expires_at": "2024-01-08T00:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Unknown user or wrong password (indistinguishable)
/// - 503 Service Unavailable: Identity store or revocation ledger unreachable
pub async fn login<L, I>(
    state: web::Data<AppState<L, I>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    L: RevocationLedger + 'static,
    I: IdentityStore + 'static,
{
    // Out-of-range credentials can never match, and saying why would leak policy
    if request.validate().is_err() {
        return unauthorized();
    }

    match state
        .auth_service
        .login(&request.username, &request.password)
        .await
    {
        Ok(pair) => HttpResponse::Ok().json(TokenPairResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}
