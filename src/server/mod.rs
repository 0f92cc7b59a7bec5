//! TCP сервер поиска по субтитрам
//!
//! Каждое соединение обслуживается отдельной задачей tokio; задачи не
//! разделяют изменяемого состояния.

pub mod session;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::SearchConfig;
use crate::error::Result;

pub use session::{handle_session, run_query};

/// Запустить сервер и обслуживать клиентов до Ctrl+C
///
/// Ошибка bind возвращается вызывающему и прерывает запуск.
pub async fn run_server(config: SearchConfig) -> Result<()> {
    config.validate()?;

    let listener = TcpListener::bind(config.address()).await?;
    log::info!(
        "[LISTENING] Subtitle search server is listening on {}",
        listener.local_addr()?
    );
    log::info!("[DIRECTORY] Searching in: {}", config.directory.display());

    let config = Arc::new(config);

    tokio::select! {
        result = serve(listener, config) => result,
        _ = tokio::signal::ctrl_c() => {
            log::info!("[SHUTTING DOWN] Server is shutting down...");
            Ok(())
        }
    }
}

/// Принимать соединения на уже открытом `listener`
pub async fn serve(listener: TcpListener, config: Arc<SearchConfig>) -> Result<()> {
    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                log::warn!("Failed to accept connection: {}", e);
                continue;
            }
        };

        let config = Arc::clone(&config);
        tokio::spawn(async move {
            let peer = addr.to_string();
            log::info!("[NEW CONNECTION] {} connected.", peer);

            if let Err(e) = handle_session(stream, &peer, config).await {
                log::error!("[ERROR] Session {} failed: {}", peer, e);
            }

            log::info!("[DISCONNECTED] {} disconnected.", peer);
        });
    }
}
