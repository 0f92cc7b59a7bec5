//! Интерактивный клиент сервера поиска

use std::io::{ErrorKind, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::TcpStream;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::search::result::END_MARKER_LINE;

/// Подключиться к серверу и выполнять запросы, введенные пользователем
pub async fn run_client(config: &SearchConfig) -> Result<()> {
    let address = config.address();
    let stream = match TcpStream::connect(&address).await {
        Ok(stream) => stream,
        Err(e) if e.kind() == ErrorKind::ConnectionRefused => {
            println!("Could not connect to the server. Make sure it's running.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Connected to subtitle search server at {}", address);
    println!("Type search queries or 'exit' to quit.");

    let (reader, mut writer) = stream.into_split();
    let mut responses = BufReader::new(reader).lines();
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("Search: ");
        std::io::stdout().flush()?;

        let Some(line) = input.next_line().await? else {
            break;
        };
        let query = line.trim();
        if query.eq_ignore_ascii_case("exit") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        writer.write_all(format!("{}\n", query).as_bytes()).await?;

        let completed = read_response(&mut responses, |line| println!("{}", line)).await?;
        if !completed {
            println!("Server closed the connection.");
            break;
        }
    }

    println!("Disconnected from server.");
    Ok(())
}

/// Прочитать ответ на один запрос, передавая строки в `on_line`
///
/// Возвращает false, если соединение закрылось до маркера конца.
pub async fn read_response<R, F>(lines: &mut Lines<R>, mut on_line: F) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(&str),
{
    while let Some(line) = lines.next_line().await? {
        if line == END_MARKER_LINE {
            return Ok(true);
        }
        on_line(&line);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_response_stops_at_marker() {
        let data: &[u8] = b"EN (a_en.srt) 00:00:01,000 -> 00:00:02,000\nHello\n\n<END>\nnext query\n";
        let mut lines = BufReader::new(data).lines();
        let mut seen = Vec::new();

        let completed = read_response(&mut lines, |line| seen.push(line.to_string()))
            .await
            .unwrap();

        assert!(completed);
        assert_eq!(seen, vec!["EN (a_en.srt) 00:00:01,000 -> 00:00:02,000", "Hello", ""]);
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("next query"));
    }

    #[tokio::test]
    async fn test_read_response_detects_closed_connection() {
        let data: &[u8] = b"partial\n";
        let mut lines = BufReader::new(data).lines();
        assert!(!read_response(&mut lines, |_| {}).await.unwrap());
    }
}
