use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use attendance_tracker::api::router;
use attendance_tracker::config::{AppConfig, SemesterConfig};
use attendance_tracker::state::AppState;
use attendance_tracker::store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "attendance_tracker=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;
    let semester = SemesterConfig::load(config.semester_path.as_deref())?;
    info!(
        "Semester {} to {}: {} timetable slots, {} holidays",
        semester.start,
        semester.end,
        semester.timetable.len(),
        semester.holidays.len()
    );

    let store = store::connect(&config.store).await?;
    let state = AppState::new(store, semester);

    let app = router(state);

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
