use std::net::SocketAddr;

use altiroute::{
    config::Config, create_router, directions::SyntheticDirections, engine::RouteAnalyticsEngine,
    AppState,
};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "altiroute=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();
    let elevation = config.elevation()?;
    let places = config.places()?;
    tracing::info!("using {:?} elevation source", config.elevation_source);

    let engine = RouteAnalyticsEngine::new(
        SyntheticDirections,
        elevation,
        places,
        config.engine_config(),
    )?;
    let app = create_router(AppState::new(engine));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("starting backend on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
