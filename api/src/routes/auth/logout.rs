use actix_web::{web, HttpResponse};
use validator::Validate;

use ks_core::repositories::{IdentityStore, RevocationLedger};

use crate::dto::{LogoutRequest, MessageResponse};
use crate::handlers::{handle_domain_error, unauthorized};
use crate::routes::AppState;

/// Handler for POST /logout
///
/// Revokes the presented refresh token. Logging out twice succeeds both times.
/// The matching access token stays valid until it expires.
///
/// ## Errors
/// - 401 Unauthorized: Token is not a valid refresh token
/// - 503 Service Unavailable: Revocation ledger unreachable
pub async fn logout<L, I>(
    state: web::Data<AppState<L, I>>,
    request: web::Json<LogoutRequest>,
) -> HttpResponse
where
    L: RevocationLedger + 'static,
    I: IdentityStore + 'static,
{
    if request.validate().is_err() {
        return unauthorized();
    }

    match state.auth_service.logout(&request.refresh_token).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Logged out successfully")),
        Err(error) => handle_domain_error(error),
    }
}
