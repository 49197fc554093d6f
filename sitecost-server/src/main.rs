#[macro_use]
extern crate tracing;
extern crate serde_json;

use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::error::JsonPayloadError;
use actix_web::web::Data;
use actix_web::{web, App};
use actix_web::{HttpResponse, HttpServer};
use actix_web_httpauth::middleware::HttpAuthentication;
use anyhow::Context;
use rustls::{Certificate, PrivateKey, ServerConfig};
use rustls_pemfile::{certs, pkcs8_private_keys};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry;

use sitecost_lib::auth::jwt::JWTAuth;
use sitecost_lib::auth::provider::IdentityProvider;
use sitecost_lib::config::Config;
use sitecost_lib::{auth, draw, expense, forecast, health, project};

const SERVICE_NAME: &str = "sitecost-server";

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = registry::Registry::default()
        .with(LevelFilter::INFO)
        .with(tracing_subscriber::fmt::Layer::default());
    let tracing_guard = tracing::subscriber::set_default(subscriber);
    info!("tracing initialized");

    let config_path = get_config_file()?;
    let config: Config = Config::from_file(config_path)?;

    let telemetry_layer =
        sitecost_lib::tracing::create_opentelemetry_layer(SERVICE_NAME, &config.honeycomb_api_key)?;

    let subscriber = registry::Registry::default()
        .with(LevelFilter::INFO)
        .with(tracing_subscriber::fmt::Layer::default())
        .with(telemetry_layer);
    tracing::subscriber::set_global_default(subscriber).expect("set up subscriber");
    drop(tracing_guard);

    let (project_repo, forecast_repo, expense_repo, draw_repo, health_check) =
        sitecost_repo::sqlx_repo::create_repos(config.database_url, 10).await;

    let jwt_auth = JWTAuth::from_secret(config.auth.jwt_secret.as_bytes());
    let identity_provider =
        IdentityProvider::new(config.auth.provider_url, config.auth.api_key);
    let bearer_auth_middleware = HttpAuthentication::bearer(auth::credentials_validator);
    let signups_enabled = config.signups_enabled;

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(jwt_auth.clone())
            .app_data(Data::new(project_repo.clone()))
            .app_data(Data::new(forecast_repo.clone()))
            .app_data(Data::new(expense_repo.clone()))
            .app_data(Data::new(draw_repo.clone()))
            .app_data(Data::new(health_check.clone()))
            .app_data(Data::new(identity_provider.clone()))
            .wrap(sitecost_lib::tracing::create_middleware())
            .wrap(Cors::permissive())
            .service(project::project_service().wrap(bearer_auth_middleware.clone()))
            .service(forecast::forecast_service().wrap(bearer_auth_middleware.clone()))
            .service(expense::expense_service().wrap(bearer_auth_middleware.clone()))
            .service(draw::draw_service().wrap(bearer_auth_middleware.clone()))
            .service(auth::auth_service(signups_enabled))
            .service(health::health_service())
            .route("/", web::get().to(banner))
            .app_data(web::JsonConfig::default().error_handler(|err, req| {
                error!(req_path = req.path(), %err);
                match err {
                    JsonPayloadError::Deserialize(deserialize_err) => {
                        let error_body = serde_json::json!({
                            "error": "Unable to parse JSON payload",
                            "detail": format!("{}", deserialize_err),
                        });
                        actix_web::error::InternalError::from_response(
                            deserialize_err,
                            HttpResponse::BadRequest()
                                .content_type("application/json")
                                .body(error_body.to_string()),
                        )
                        .into()
                    }
                    _ => err.into(),
                }
            }))
    });
    server = match config.ssl {
        None => {
            warn!("Using http");
            server.bind("0.0.0.0:8000")?
        }
        Some(ssl_config) => {
            info!("Using https");

            let config = ServerConfig::builder()
                .with_safe_defaults()
                .with_no_client_auth();

            let mut cert_file = BufReader::new(
                File::open(ssl_config.certificate_chain_file)
                    .context("Error opening certificate chain file")?,
            );
            let mut key_file = BufReader::new(
                File::open(ssl_config.private_key_file)
                    .context("Error opening private key file")?,
            );

            let cert_chain = certs(&mut cert_file)
                .context("Unable to read certificate chain file")?
                .into_iter()
                .map(Certificate)
                .collect();
            let mut keys: Vec<PrivateKey> = pkcs8_private_keys(&mut key_file)
                .context("Unable to read private key file")?
                .into_iter()
                .map(PrivateKey)
                .collect();

            if keys.is_empty() {
                error!("No private key found in file");
                std::process::exit(1);
            }

            let config = config.with_single_cert(cert_chain, keys.remove(0))?;

            server.bind_rustls("0.0.0.0:8000", config)?
        }
    };
    server.run().await?;

    Ok(())
}

async fn banner() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "msg": "sitecost API" }))
}

fn get_config_file() -> Result<PathBuf, &'static str> {
    let config_current_dir = PathBuf::from("config.toml");
    if config_current_dir.exists() {
        return Ok(config_current_dir);
    }
    if let Ok(config_env) = std::env::var("CONFIGURATION_DIRECTORY") {
        let config_path = PathBuf::from(config_env).join("config.toml");
        if config_path.exists() {
            return Ok(config_path);
        }
    }

    Err("Config file not found")
}
