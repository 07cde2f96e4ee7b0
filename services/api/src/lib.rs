mod cli;
mod demo;
mod infra;
mod refresher;
mod routes;
mod server;

use slugsearch::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
