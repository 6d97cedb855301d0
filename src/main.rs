use std::sync::Arc;

use dispomon::{
    build_app,
    config::Config,
    domain::{availability, facade::Facade},
    logging, AppState,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;
    let source = availability::build_source(config.source_kind);
    let facades = match config.service_name.as_deref() {
        Some(name) => vec![Arc::new(Facade::single(name, &source))],
        None => Facade::standard_set(&source),
    };

    let bind_socket = config.bind_socket()?;
    let state = AppState::new(facades);
    let app = build_app(state.clone());
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        facades = state.facades.len(),
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
