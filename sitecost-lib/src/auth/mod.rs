use actix_web::dev::ServiceRequest;
use actix_web::{web, Error, HttpMessage, Scope};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use actix_web_httpauth::extractors::{bearer, AuthenticationError};
use actix_web_httpauth::headers::www_authenticate::bearer::Bearer;
use jwt::JWTAuth;
use tracing_actix_web::RootSpan;

pub mod handlers;
pub mod jwt;
pub mod provider;

/// Id of the authenticated user, as issued by the identity provider (the
/// `sub` claim of its access tokens).
pub type UserId = String;

/// Validates the bearer token using [JWTAuth]. If valid, injects the user id
/// into the request and into the [RootSpan].
pub async fn credentials_validator(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let jwt_auth = req.app_data::<JWTAuth>().unwrap();
    if let Ok(user) = jwt_auth.validate_token(credentials.token()) {
        if let Some(root_span) = req.extensions().get::<RootSpan>() {
            root_span.record("user_id", &user.as_str());
        }
        req.extensions_mut().insert::<UserId>(user);
        Ok(req)
    } else {
        let challenge = Bearer::build().error(bearer::Error::InvalidToken).finish();
        Err((AuthenticationError::new(challenge).into(), req))
    }
}

/// Signup, login and session endpoints, all of which delegate to the
/// external identity provider. The signup route is only exposed when
/// enabled in config.
pub fn auth_service(signups_enabled: bool) -> Scope {
    let scope = web::scope("/auth")
        .service(handlers::login)
        .service(handlers::refresh)
        .service(handlers::logout);
    if signups_enabled {
        scope.service(handlers::register)
    } else {
        scope
    }
}
