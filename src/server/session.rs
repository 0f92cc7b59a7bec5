//! Обработка одной клиентской сессии
//!
//! Клиент присылает по одному запросу в строке. На каждый запрос сервер
//! отправляет кадры по мере нахождения, затем, если ничего не найдено,
//! сообщение об этом, и всегда завершает ответ маркером `<END>`.

use std::sync::Arc;

use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::sync::mpsc;

use crate::config::SearchConfig;
use crate::error::{Result, SubSearchError};
use crate::search::{ChannelSink, SearchEngine, SearchOutcome, END_MARKER, NO_MATCH_NOTICE};

/// Обслужить сессию до пустого запроса, закрытия соединения или ошибки
pub async fn handle_session<S>(stream: S, peer: &str, config: Arc<SearchConfig>) -> Result<()>
where
    S: AsyncRead + AsyncWrite,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut reader = BufReader::new(reader);

    while let Some(line) = read_query(&mut reader, config.max_query_bytes).await? {
        let query = line.trim();
        if query.is_empty() {
            log::debug!("Client {} sent an empty query, closing session", peer);
            break;
        }

        log::info!("[SEARCH] Client {} searching for: '{}'", peer, query);
        let outcome = run_query(query, &config, &mut writer).await?;
        log::info!(
            "[SEARCH] Client {}: {} result(s) for '{}' ({} file(s) scanned, {} skipped)",
            peer,
            outcome.emitted,
            query,
            outcome.files_scanned,
            outcome.files_skipped
        );
    }

    // Клиент мог уже закрыть соединение
    let _ = writer.shutdown().await;
    Ok(())
}

/// Прочитать одну строку запроса длиной не более `max_bytes`
///
/// None при закрытии соединения. Строка длиннее лимита завершает сессию
/// ошибкой, не дожидаясь перевода строки.
pub async fn read_query<R>(reader: &mut R, max_bytes: usize) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    // +1 байт под завершающий '\n'
    let read = (&mut *reader)
        .take(max_bytes as u64 + 1)
        .read_until(b'\n', &mut buf)
        .await?;

    if read == 0 {
        return Ok(None);
    }
    if buf.last() != Some(&b'\n') && buf.len() > max_bytes {
        return Err(SubSearchError::Session(format!(
            "Query exceeds {} bytes",
            max_bytes
        )));
    }

    String::from_utf8(buf)
        .map(Some)
        .map_err(|_| SubSearchError::Session("Query is not valid UTF-8".to_string()))
}

/// Выполнить один запрос и записать ответ в `writer`
///
/// Поиск идет в блокирующем потоке и передает кадры через ограниченный
/// канал. Если запись в соединение не удалась, канал закрывается и поиск
/// останавливается на следующем совпадении.
pub async fn run_query<W>(
    query: &str,
    config: &Arc<SearchConfig>,
    writer: &mut W,
) -> Result<SearchOutcome>
where
    W: AsyncWrite + Unpin,
{
    let (tx, mut rx) = mpsc::channel::<String>(config.channel_capacity);

    let search_config = Arc::clone(config);
    let search_query = query.to_string();
    let search = tokio::task::spawn_blocking(move || {
        let mut sink = ChannelSink::new(tx);
        SearchEngine::new(&search_config).search(&search_config.directory, &search_query, &mut sink)
    });

    while let Some(frame) = rx.recv().await {
        writer.write_all(frame.as_bytes()).await?;
        writer.flush().await?;
    }

    let outcome = search
        .await
        .map_err(|e| SubSearchError::Session(format!("Search task failed: {}", e)))??;

    if !outcome.matched {
        writer.write_all(NO_MATCH_NOTICE.as_bytes()).await?;
    }
    writer.write_all(END_MARKER.as_bytes()).await?;
    writer.flush().await?;

    Ok(outcome)
}
