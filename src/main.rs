use std::path::PathBuf;

use anyhow::Context;

use subsearch::{client, logger, server, SearchConfig};

const USAGE: &str = "Usage: subsearch [server [directory] | client]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_logger();

    let mut config = SearchConfig::from_env().context("Failed to load configuration")?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None => {
            println!("Starting in server mode with {}...", config.directory.display());
            server::run_server(config).await.context("Server failed")?;
        }
        Some("server") => {
            if let Some(directory) = args.get(1) {
                config.directory = PathBuf::from(directory);
            }
            server::run_server(config).await.context("Server failed")?;
        }
        Some("client") => {
            client::run_client(&config).await.context("Client failed")?;
        }
        Some(_) => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }

    Ok(())
}
