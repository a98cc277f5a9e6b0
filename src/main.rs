use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizspark_server::{app_state::AppState, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        config.validate_for_production();
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = Arc::new(
        AppState::new(config).map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?,
    );

    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(handlers::health_check)
            .service(handlers::create_session)
            .service(handlers::delete_session)
            .service(handlers::get_progress)
            .service(handlers::generate_quiz)
            .service(handlers::generate_image_quiz)
            .service(handlers::current_quiz)
            .service(handlers::submit_answers)
    })
    .bind((host, port))?
    .run()
    .await
}
