use crate::auth::provider::IdentityProvider;
use crate::error::HandlerError;
use actix_web::{web, HttpResponse, Responder};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::Deserialize;
use serde::Serialize;

#[derive(Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Signs the user up with the identity provider, then logs them straight in
/// so the client gets a usable token pair from a single call.
#[post("/register")]
pub async fn register(
    provider: web::Data<IdentityProvider>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, HandlerError> {
    let credentials = credentials.into_inner();
    provider
        .sign_up(&credentials.email, &credentials.password)
        .await?;
    let session = provider
        .password_grant(&credentials.email, &credentials.password)
        .await?;
    Ok(HttpResponse::Ok().json(session))
}

#[post("/login")]
pub async fn login(
    provider: web::Data<IdentityProvider>,
    credentials: web::Json<Credentials>,
) -> Result<impl Responder, HandlerError> {
    let credentials = credentials.into_inner();
    let session = provider
        .password_grant(&credentials.email, &credentials.password)
        .await?;
    Ok(HttpResponse::Ok().json(session))
}

#[post("/refresh")]
pub async fn refresh(
    provider: web::Data<IdentityProvider>,
    request: web::Json<RefreshRequest>,
) -> Result<impl Responder, HandlerError> {
    let session = provider.refresh(&request.refresh_token).await?;
    Ok(HttpResponse::Ok().json(session))
}

#[post("/logout")]
pub async fn logout(
    provider: web::Data<IdentityProvider>,
    auth: BearerAuth,
) -> Result<impl Responder, HandlerError> {
    provider.logout(auth.token()).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "logged out" })))
}
