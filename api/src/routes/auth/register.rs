use actix_web::{web, HttpResponse};
use validator::Validate;

use ks_core::repositories::{IdentityStore, RevocationLedger};

use crate::dto::{MessageResponse, RegisterRequest};
use crate::handlers::{handle_domain_error, validation_error};
use crate::routes::AppState;

/// Handler for POST /register
///
/// # Request Body
///
/// ```json
/// {
///     "username": "alice",
///     "password": "correct horse battery",
///     "first_name": "Alice",
///     "last_name": "Liddell",
///     "birth_date": "1990-04-01",
///     "phone_number": "+15550100"
/// }
/// ```
///
/// Only `username` and `password` are required.
///
/// ## Errors
/// - 409 Conflict: Username already taken
/// - 422 Unprocessable Entity: Malformed body or field validation failure
/// - 503 Service Unavailable: Identity store unreachable
pub async fn register<L, I>(
    state: web::Data<AppState<L, I>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    L: RevocationLedger + 'static,
    I: IdentityStore + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    match state.auth_service.register(request.into_inner().into()).await {
        Ok(identity) => {
            tracing::info!(subject = identity.id, "Registration completed");
            HttpResponse::Created().json(MessageResponse::new("User registered successfully"))
        }
        Err(error) => handle_domain_error(error),
    }
}
