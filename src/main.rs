use std::env;

use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use config::Config;
use dotenvy::dotenv;

use salon_booking::db::establish_connection_pool;
use salon_booking::models::config::ServerConfig;
use salon_booking::repository::DieselRepository;
use salon_booking::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = match Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
    {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Error loading settings: {e}");
            std::process::exit(1);
        }
    };

    let server_config = match settings.try_deserialize::<ServerConfig>() {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Error loading server config: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server_config.scheduling.validate() {
        log::error!("Invalid scheduling config: {e}");
        std::process::exit(1);
    }

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);
    let scheduling = server_config.scheduling;
    let bind = (server_config.address.clone(), server_config.port);

    log::info!(
        "Starting salon booking API on {}:{} (slot granularity {} min)",
        bind.0,
        bind.1,
        scheduling.slot_granularity_minutes
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(scheduling))
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await
}
