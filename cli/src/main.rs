use clap::Parser;

mod app;
mod commands;

use commands::cli;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();

    match app::run_app(args).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("polctl: {err:#}");
            std::process::exit(1);
        }
    }
}
