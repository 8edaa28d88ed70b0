use application::CommentsApp;
use config::Config;
use domain::{CourseRepository, UserRepository};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Prepares the comments database: creates the schema and seeds the demo
/// users and courses that comments can reference.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    info!("Preparing database at {}", config.database_path);
    let app = CommentsApp::new(&config.database_path)?;

    let report = app.seed_demo_data().await?;
    let users = app.user_repository.find_all().await?;
    let courses = app.course_repository.find_all().await?;

    info!(
        "Seeded {} users and {} courses ({} users, {} courses in store)",
        report.users,
        report.courses,
        users.len(),
        courses.len()
    );
    for user in &users {
        info!("  user   {:>4}  {}", user.id.unwrap_or_default(), user.username);
    }
    for course in &courses {
        info!("  course {:>4}  {}", course.id.unwrap_or_default(), course.name);
    }

    Ok(())
}
