use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::db;
use crate::error::AppError;

pub const DEFAULT_LOG_FILTER: &str = "info,todo_api=debug";
const DATA_DIR_NAME: &str = ".todo-api";

#[derive(Parser, Debug)]
#[command(
    name = "todo-api",
    version,
    about = "Serve a todo list over HTTP, backed by SQLite"
)]
pub struct Cli {
    #[arg(
        long,
        env = "TODO_API_DATA_DIR",
        value_name = "PATH",
        help = "Directory holding todos.db (defaults to $HOME/.todo-api)"
    )]
    pub data_dir: Option<PathBuf>,
    #[arg(
        long,
        env = "TODO_API_DATABASE",
        value_name = "FILE",
        help = "SQLite database file; overrides --data-dir"
    )]
    pub database: Option<PathBuf>,
    #[arg(
        long,
        env = "TODO_API_LISTEN",
        value_name = "ADDR",
        default_value = "127.0.0.1:3000"
    )]
    pub listen: SocketAddr,
    #[arg(
        long,
        value_name = "FILTER",
        help = "Log filter used when RUST_LOG is unset"
    )]
    pub log: Option<String>,
    #[arg(
        long,
        conflicts_with_all = ["data_dir", "database"],
        help = "Keep todos in memory only; nothing is written to disk"
    )]
    pub in_memory: bool,
}

impl Cli {
    pub fn log_filter(&self) -> &str {
        self.log.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn resolve_database_path(&self) -> Result<PathBuf, AppError> {
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }
        if let Some(dir) = &self.data_dir {
            return Ok(db::resolve_db_path(dir));
        }
        match std::env::var("HOME") {
            Ok(home) if !home.trim().is_empty() => {
                Ok(db::resolve_db_path(&PathBuf::from(home).join(DATA_DIR_NAME)))
            }
            _ => Err(AppError::Config(
                "unable to resolve data directory; set --data-dir or TODO_API_DATA_DIR"
                    .to_string(),
            )),
        }
    }
}
