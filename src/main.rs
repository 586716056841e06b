use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_api::cli::Cli;
use todo_api::{db, http};
use todo_api::{AppError, InMemoryTodoRepository, SqliteTodoRepository, TodoRepository, TodoService};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_tracing(cli.log_filter())?;

    if cli.in_memory {
        tracing::warn!("using in-memory storage; todos are discarded on exit");
        return serve(&cli, InMemoryTodoRepository::new()).await;
    }

    let db_path = cli.resolve_database_path()?;
    db::ensure_parent_dir(&db_path)?;
    let mut lock = db::open_lock(&db_path)?;
    let _guard = lock.try_write().map_err(|_| {
        AppError::Config(format!(
            "database {} is already served by another process",
            db_path.display()
        ))
    })?;

    let db = db::connect(&db_path).await?;
    db::ensure_schema(&db).await?;
    tracing::info!(path = %db_path.display(), "database ready");

    serve(&cli, SqliteTodoRepository::new(db)).await
}

fn init_tracing(default_filter: &str) -> Result<(), AppError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|err| AppError::Config(format!("failed to initialise logging: {err}")))
}

async fn serve<R: TodoRepository>(cli: &Cli, repository: R) -> Result<(), AppError> {
    let listener = TcpListener::bind(cli.listen).await?;
    tracing::info!(addr = %cli.listen, "listening");

    let app = http::router(TodoService::new(repository));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
