mod cli;
mod commands;
mod infra;
mod routes;
mod server;

use civic_index::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
