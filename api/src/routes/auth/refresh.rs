use actix_web::{web, HttpResponse};
use validator::Validate;

use ks_core::repositories::{IdentityStore, RevocationLedger};

use crate::dto::{RefreshTokenRequest, TokenPairResponse};
use crate::handlers::{handle_domain_error, unauthorized};
use crate::routes::AppState;

/// Handler for POST /token/refresh
///
/// Redeems a refresh token for a new pair. Each refresh token works once; a
/// second presentation is rejected like any other invalid token.
///
/// ## Errors
/// - 401 Unauthorized: Invalid, expired, reused or revoked refresh token
/// - 503 Service Unavailable: Identity lookup or ledger failure
/// - 500 Internal Server Error: Signing failure
pub async fn refresh<L, I>(
    state: web::Data<AppState<L, I>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    L: RevocationLedger + 'static,
    I: IdentityStore + 'static,
{
    if request.validate().is_err() {
        return unauthorized();
    }

    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(pair) => HttpResponse::Ok().json(TokenPairResponse::from(pair)),
        Err(error) => handle_domain_error(error),
    }
}

#[cfg(test)]
mod tests {
    use crate::dto::RefreshTokenRequest;

    #[test]
    fn test_refresh_request_shape() {
        let request: RefreshTokenRequest =
            serde_json::from_str(r#"{"refresh_token": "abc.def.ghi"}"#).unwrap();
        assert_eq!(request.refresh_token, "abc.def.ghi");
    }
}
