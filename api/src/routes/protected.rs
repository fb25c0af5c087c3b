use actix_web::HttpResponse;

use crate::dto::ProtectedDataResponse;
use crate::middleware::Authenticated;

/// Handler for GET /api/data, mounted behind `JwtAuth`
pub async fn protected_data(auth: Authenticated) -> HttpResponse {
    HttpResponse::Ok().json(ProtectedDataResponse {
        message: "This is a protected route".to_string(),
        subject: auth.subject,
    })
}
