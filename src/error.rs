//! Модуль обработки ошибок библиотеки subsearch
//!
//! Этот модуль содержит типы ошибок, которые могут возникнуть при поиске по субтитрам.

use thiserror::Error;

/// Ошибки библиотеки subsearch
#[derive(Debug, Error)]
pub enum SubSearchError {
    /// Ошибка ввода-вывода
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Ошибка сериализации/десериализации JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Ошибка парсинга субтитров
    #[error("Subtitle parsing error: {0}")]
    SubtitleParsing(String),

    /// Неверный формат
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Ошибка конфигурации
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Получатель результатов закрыт (клиент отключился)
    #[error("Result sink closed: {0}")]
    SinkClosed(String),

    /// Ошибка сессии клиента
    #[error("Session error: {0}")]
    Session(String),

    /// Другая ошибка
    #[error("Other error: {0}")]
    Other(String),
}

impl From<&str> for SubSearchError {
    fn from(s: &str) -> Self {
        SubSearchError::Other(s.to_string())
    }
}

impl From<String> for SubSearchError {
    fn from(s: String) -> Self {
        SubSearchError::Other(s)
    }
}

// Отправка в закрытый канал означает, что сессия больше не читает результаты
impl<T> From<tokio::sync::mpsc::error::SendError<T>> for SubSearchError {
    fn from(err: tokio::sync::mpsc::error::SendError<T>) -> Self {
        SubSearchError::SinkClosed(format!("Failed to send frame: {}", err))
    }
}

/// Тип Result для библиотеки subsearch
pub type Result<T> = std::result::Result<T, SubSearchError>;
