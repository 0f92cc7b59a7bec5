//! Результат поиска и формат кадра, отправляемого клиенту

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::subtitle::format_timestamp;

/// Сообщение, если по запросу ничего не найдено
pub const NO_MATCH_NOTICE: &str = "No matching subtitles found.";
/// Строка кадра без перевода
pub const NO_TRANSLATION_NOTICE: &str = "No corresponding translation found.";
/// Маркер конца ответа на один запрос
pub const END_MARKER: &str = "\n<END>\n";
/// Строка маркера, как ее видит клиент при построчном чтении
pub const END_MARKER_LINE: &str = "<END>";
/// Ширина разделителя между кадрами
pub const SEPARATOR_WIDTH: usize = 80;

/// Найденный субтитр (оригинал или перевод)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleRef {
    /// Метка языка ("EN", "RU")
    pub language: String,
    /// Путь к файлу субтитров
    pub file_path: PathBuf,
    /// Время начала
    pub start: Duration,
    /// Время окончания
    pub end: Duration,
    /// Нормализованный текст
    pub text: String,
}

/// Совпадение с необязательным переводом
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub original: SubtitleRef,
    pub translation: Option<SubtitleRef>,
}

impl MatchResult {
    /// Сформировать текстовый кадр для отправки клиенту
    pub fn to_frame(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SubtitleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} ({}) {} -> {}",
            self.language,
            self.file_path.display(),
            format_timestamp(self.start),
            format_timestamp(self.end)
        )?;
        writeln!(f, "{}", self.text)
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.original)?;
        match &self.translation {
            Some(translation) => writeln!(f, "{}", translation)?,
            None => writeln!(f, "{}\n", NO_TRANSLATION_NOTICE)?,
        }
        writeln!(f, "{}", "-".repeat(SEPARATOR_WIDTH))
    }
}
