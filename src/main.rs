use actix_web::{web, App, HttpServer};
use log::{info, warn};

use keepsake::api::{
    create_review, delete_photo, index, photos, reviews, test_page, upload, uploaded_file,
};
use keepsake::app_state::AppState;
use keepsake::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Logging comes up before the app config loads so the load itself is
    // logged; the log4rs file is therefore the default path, and a custom
    // logging.config_file cannot apply retroactively.
    let log_config_file = AppConfig::default().logging.config_file;
    log4rs::init_file(&log_config_file, Default::default()).unwrap();

    let config = AppConfig::load().expect("Failed to load configuration");
    if config.logging.config_file != log_config_file {
        warn!(
            "Logging already initialized from {}, ignoring configured {}",
            log_config_file, config.logging.config_file
        );
    }

    let host = config.server.host.clone();
    let port = config.server.port;
    let workers = config.server.workers;
    let max_payload = config.server.max_payload_size;

    let state = AppState::from_config(config);
    info!("Starting server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .app_data(web::PayloadConfig::default().limit(max_payload))
            .app_data(web::Data::new(state.clone()))
            .service(index)
            .service(test_page)
            .service(upload)
            .service(photos)
            .service(uploaded_file)
            .service(delete_photo)
            .service(reviews)
            .service(create_review)
    })
    .workers(workers)
    .bind((host.as_str(), port))?
    .run()
    .await
}
