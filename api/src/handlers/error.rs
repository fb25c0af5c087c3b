//! Mapping of domain failures to HTTP responses
//!
//! Every credential or token failure collapses into one generic 401 body. The
//! precise kind goes to the operator log only.

use actix_web::{error::JsonPayloadError, HttpRequest, HttpResponse};
use ks_core::errors::{AuthError, DomainError, TokenError};
use ks_shared::errors::{error_codes, ErrorResponse};
use validator::ValidationErrors;

const GENERIC_UNAUTHORIZED: &str = "Invalid credentials";

/// The single 401 response shared by login, rotation, logout and the gate
pub fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::UNAUTHORIZED,
        GENERIC_UNAUTHORIZED,
    ))
}

/// Convert a domain error into its HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match &error {
        DomainError::Auth(AuthError::InvalidCredentials)
        | DomainError::Token(TokenError::Invalid(_))
        | DomainError::Token(TokenError::Revoked)
        | DomainError::Token(TokenError::NotFound)
        | DomainError::Verification(_) => {
            tracing::warn!(error_kind = error.kind(), "Request rejected as unauthorized");
            unauthorized()
        }

        DomainError::Auth(AuthError::UsernameTaken { .. }) => {
            tracing::info!(error_kind = error.kind(), "Registration conflict");
            HttpResponse::Conflict().json(ErrorResponse::new(
                error_codes::CONFLICT,
                "Username already taken",
            ))
        }

        DomainError::Validation { message } => HttpResponse::UnprocessableEntity().json(
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone()),
        ),

        DomainError::Auth(AuthError::IdentityStoreUnavailable { .. })
        | DomainError::Token(TokenError::IdentityLookupFailed { .. })
        | DomainError::Token(TokenError::LedgerUnavailable { .. }) => {
            tracing::error!(error_kind = error.kind(), error = %error, "Dependency unavailable");
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable, please retry later",
            ))
        }

        DomainError::Token(TokenError::SigningError { .. }) | DomainError::Internal { .. } => {
            tracing::error!(error_kind = error.kind(), error = %error, "Internal failure");
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "An internal error occurred",
            ))
        }
    }
}

/// 422 response listing the offending fields
pub fn validation_error(errors: &ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request");
    for (field, field_errors) in errors.field_errors() {
        let codes: Vec<String> = field_errors.iter().map(|e| e.code.to_string()).collect();
        response = response.add_detail(field.to_string(), codes);
    }
    HttpResponse::UnprocessableEntity().json(response)
}

/// `JsonConfig` error handler: unparseable bodies are 422, not 400
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    let response = HttpResponse::UnprocessableEntity().json(ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        "Invalid JSON provided",
    ));
    actix_web::error::InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use ks_core::errors::VerificationError;

    #[test]
    fn test_token_failures_are_indistinguishable() {
        let errors = [
            DomainError::Auth(AuthError::InvalidCredentials),
            DomainError::Token(TokenError::Revoked),
            DomainError::Token(TokenError::NotFound),
            DomainError::Token(TokenError::Invalid(VerificationError::Expired)),
            DomainError::Token(TokenError::Invalid(VerificationError::SignatureInvalid)),
            DomainError::Verification(VerificationError::WrongKind {
                expected: ks_core::TokenKind::Access,
                actual: ks_core::TokenKind::Refresh,
            }),
        ];

        for error in errors {
            assert_eq!(handle_domain_error(error).status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                DomainError::Auth(AuthError::UsernameTaken {
                    username: "alice".to_string(),
                }),
                StatusCode::CONFLICT,
            ),
            (
                DomainError::Validation {
                    message: "bad".to_string(),
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                DomainError::Token(TokenError::IdentityLookupFailed {
                    message: "down".to_string(),
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                DomainError::Token(TokenError::LedgerUnavailable {
                    message: "down".to_string(),
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                DomainError::Auth(AuthError::IdentityStoreUnavailable {
                    message: "down".to_string(),
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                DomainError::Token(TokenError::SigningError {
                    message: "bad key".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (DomainError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(handle_domain_error(error).status(), status);
        }
    }
}
