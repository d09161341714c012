use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workout_scheduler::config::Config;
use workout_scheduler::handlers::workouts;
use workout_scheduler::notifications::LogMailer;
use workout_scheduler::repositories::WorkoutRepository;
use workout_scheduler::services::WorkoutCoordinator;
use workout_scheduler::{db, migrations, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workout_scheduler=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing::info!("Connecting to database: {}", config.database_url);
    let pool = db::create_pool(&config.database_url)?;
    migrations::run_migrations(&pool)?;

    // Wire collaborators once; the coordinator is immutable afterwards
    let store = Arc::new(WorkoutRepository::new(pool));
    let mailer = Arc::new(LogMailer::new(config.mail_from.clone()));
    let coordinator = WorkoutCoordinator::new(store, mailer);

    let app = routes::create_router(workouts::WorkoutsState { coordinator });

    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutting down");
}
