//! Модуль работы с субтитрами
//!
//! Парсинг SRT файлов, нормализация текста и поиск субтитра,
//! совпадающего по времени в файле на другом языке.

pub mod alignment;
pub mod parser;
pub mod text;

use std::time::Duration;

pub use alignment::find_closest;
pub use parser::{format_timestamp, parse_srt_file, parse_srt_str};
pub use text::normalize;

/// Одна запись субтитров, прочитанная из файла
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleRecord {
    /// Текст субтитра (строки разделены '\n')
    pub text: String,
    /// Время начала
    pub start: Duration,
    /// Время окончания
    pub end: Duration,
}

impl SubtitleRecord {
    /// Создать новую запись
    pub fn new(text: impl Into<String>, start: Duration, end: Duration) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}
