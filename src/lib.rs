//! Основной файл библиотеки subsearch
//!
//! Сервер потокового поиска по двуязычной библиотеке субтитров: клиент
//! присылает запрос, сервер находит подходящие строки субтитров и для
//! каждой подбирает перевод из парного файла по времени начала.

pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod search;
pub mod server;
pub mod subtitle;

pub use crate::config::SearchConfig;
pub use crate::error::{Result, SubSearchError};
pub use crate::search::{MatchResult, ResultSink, SearchEngine, SearchOutcome};
pub use crate::subtitle::SubtitleRecord;

#[cfg(test)]
mod tests {
    mod test_search;
    mod test_session;
}
