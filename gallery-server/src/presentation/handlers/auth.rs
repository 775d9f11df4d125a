use crate::application::auth_service::AuthService;
use crate::domain::error::DomainError;
use crate::infrastructure::security::TOKEN_TTL_SECS;
use crate::presentation::dto::{AuthResponse, LoginRequest};
use crate::presentation::utils::request_id;
use actix_web::{HttpRequest, HttpResponse, Responder, Scope, post, web};
use tracing::{info, warn};

pub fn scope() -> Scope {
    web::scope("/auth").service(login)
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    service: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<impl Responder, DomainError> {
    let jwt = service.login(&payload.password).inspect_err(|_| {
        warn!(request_id = %request_id(&req), "admin login failed");
    })?;

    info!(request_id = %request_id(&req), "admin logged in");

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: jwt,
        expires_in: TOKEN_TTL_SECS,
        token_type: "Bearer".to_string(),
    }))
}
