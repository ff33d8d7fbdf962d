use dotenvy::dotenv;
use shopkeeper::core::{auth, notifications};
use shopkeeper::errors::Result;
use shopkeeper::repository::Repository;
use shopkeeper::store::{Store, init_store};
use shopkeeper::config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()?;
    info!("Using durable store at '{}'.", app_config.database_path);

    // 4. Open the durable store
    let pool = init_store(&app_config.database_path)
        .await
        .inspect(|_| info!("Durable store initialized successfully."))
        .inspect_err(|e| warn!("Failed to initialize durable store: {}", e))?;
    let store = Store::new(pool);

    // 5. Hydrate the repository (falls back to defaults per collection)
    let mut repo = Repository::load(store).await;

    // 6. Restore the session if a credential pair was saved
    match auth::auto_login(&mut repo).await {
        Some(user) => info!("Session restored for '{}'.", user.username),
        None => info!("No saved session; login required."),
    }

    // 7. Startup notification sweep over stock and debts
    notifications::scan(&mut repo).await;
    info!(
        "{} unread notification(s) after startup sweep.",
        notifications::unread_count(&repo)
    );

    info!(
        "Ready: {} products, {} customers, {} sales on record, next invoice #{}.",
        repo.products().len(),
        repo.customers().len(),
        repo.sales().len(),
        repo.invoice_counter()
    );

    Ok(())
}
