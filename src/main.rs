use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use personalearn_server::app_state::AppState;
use personalearn_server::config::Config;
use personalearn_server::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let state = AppState::new(config);

    log::info!("Starting server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .service(handlers::health_check)
            .service(handlers::create_session)
            .service(handlers::get_session)
            .service(handlers::reset_session)
            .service(handlers::delete_session)
            .service(handlers::submit_profile)
            .service(handlers::generate_lesson)
            .service(handlers::answer_follow_up)
            .service(handlers::get_history)
            .service(handlers::generate_quiz)
            .service(handlers::get_quiz)
            .service(handlers::submit_answer)
            .service(handlers::restart_quiz)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
