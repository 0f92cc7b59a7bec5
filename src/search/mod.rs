//! Модуль поиска по субтитрам
//!
//! Определение языка запроса, потоковый обход файлов, поиск перевода
//! и формирование кадров ответа.

pub mod engine;
pub mod language;
pub mod resolver;
pub mod result;

pub use engine::{ChannelSink, ResultSink, SearchEngine, SearchOutcome};
pub use language::QueryLanguages;
pub use resolver::{resolve, Translation};
pub use result::{MatchResult, SubtitleRef, END_MARKER, NO_MATCH_NOTICE, NO_TRANSLATION_NOTICE};
