use actix_web::{App, HttpServer, middleware::Logger, web};
use arquivos_backend::{
    AppState,
    config::AppConfig,
    logging::init_tracing,
    root::resolve_root,
    routes::{cors, register},
};
use tracing::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::from_env().expect("failed to load config");
    let _guard = init_tracing(&config.log_dir).expect("failed to init logging");

    let root = resolve_root(config.target_directory.as_deref())
        .expect("failed to prepare served directory");

    info!(
        host = %config.host,
        port = config.port,
        root = %root.display(),
        "starting arquivos backend"
    );

    let shared_state = web::Data::new(AppState { root });

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors())
            .app_data(shared_state.clone())
            .configure(register)
    })
    .bind(config.bind_addr())?
    .run()
    .await
}
