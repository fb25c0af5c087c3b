//! Application factory

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use ks_core::repositories::{IdentityStore, RevocationLedger};
use ks_shared::errors::{error_codes, ErrorResponse};

use crate::handlers::json_error_handler;
use crate::middleware::JwtAuth;
use crate::routes::{auth, health::health_check, protected::protected_data, AppState};

/// Default JSON body limit when none is configured
pub const DEFAULT_JSON_LIMIT: usize = 64 * 1024;

/// Build the application around shared state
///
/// The gate comes from the same token service the state holds, so the
/// middleware and the rotation endpoint always agree on keys.
pub fn create_app<L, I>(
    app_state: web::Data<AppState<L, I>>,
    json_limit: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    L: RevocationLedger + 'static,
    I: IdentityStore + 'static,
{
    let gate = app_state.auth_service.token_service().gate();

    App::new()
        .app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(json_limit)
                .error_handler(json_error_handler),
        )
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .route("/register", web::post().to(auth::register::<L, I>))
        .route("/login", web::post().to(auth::login::<L, I>))
        .route("/token/refresh", web::post().to(auth::refresh::<L, I>))
        .route("/logout", web::post().to(auth::logout::<L, I>))
        .service(
            web::scope("/api")
                .wrap(JwtAuth::new(gate))
                .route("/data", web::get().to(protected_data)),
        )
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
