//! Потоковый поиск по дереву субтитров
//!
//! Движок обходит директорию, ищет подстроку запроса в файлах основного
//! языка и отдает каждое совпадение получателю сразу, как только оно найдено.

use std::path::Path;

use tokio::sync::mpsc;
use walkdir::WalkDir;

use super::language::QueryLanguages;
use super::resolver;
use super::result::{MatchResult, SubtitleRef};
use crate::config::SearchConfig;
use crate::error::Result;
use crate::subtitle::{normalize, parse_srt_file, SubtitleRecord};

/// Получатель результатов поиска
///
/// Ошибка из `emit` прерывает поиск и возвращается вызывающему.
pub trait ResultSink {
    fn emit(&mut self, result: MatchResult) -> Result<()>;
}

impl ResultSink for Vec<MatchResult> {
    fn emit(&mut self, result: MatchResult) -> Result<()> {
        self.push(result);
        Ok(())
    }
}

/// Получатель, отправляющий готовые кадры в ограниченный канал
///
/// Используется из блокирующего потока: `emit` ждет, пока в канале
/// освободится место, поэтому медленный клиент замедляет обход.
pub struct ChannelSink {
    sender: mpsc::Sender<String>,
}

impl ChannelSink {
    pub fn new(sender: mpsc::Sender<String>) -> Self {
        Self { sender }
    }
}

impl ResultSink for ChannelSink {
    fn emit(&mut self, result: MatchResult) -> Result<()> {
        self.sender.blocking_send(result.to_frame())?;
        Ok(())
    }
}

/// Итог одного поиска
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Найдено ли хотя бы одно совпадение
    pub matched: bool,
    /// Количество отправленных результатов
    pub emitted: usize,
    /// Количество прочитанных файлов основного языка
    pub files_scanned: usize,
    /// Количество пропущенных из-за ошибок файлов
    pub files_skipped: usize,
}

/// Движок поиска
pub struct SearchEngine<'a> {
    config: &'a SearchConfig,
}

impl<'a> SearchEngine<'a> {
    pub fn new(config: &'a SearchConfig) -> Self {
        Self { config }
    }

    /// Выполнить поиск `query` в `directory`, отправляя совпадения в `sink`
    ///
    /// Счетчик совпадений локален для вызова. Как только он достигает
    /// `match_limit`, обход прекращается.
    pub fn search<S: ResultSink + ?Sized>(
        &self,
        directory: &Path,
        query: &str,
        sink: &mut S,
    ) -> Result<SearchOutcome> {
        let languages = QueryLanguages::classify(query, self.config);
        let needle = query.to_lowercase();
        let file_suffix = format!("_{}.{}", languages.primary, self.config.extension);
        let mut outcome = SearchOutcome::default();

        log::debug!(
            "Searching '{}' in {} (primary: {}, secondary: {})",
            query,
            directory.display(),
            languages.primary,
            languages.secondary
        );

        for entry in WalkDir::new(directory).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_dir() || !entry.path().is_file() {
                continue;
            }
            if !entry.file_name().to_string_lossy().ends_with(&file_suffix) {
                continue;
            }

            let file_path = entry.path();
            let records = match parse_srt_file(file_path, &self.config.fallback_encoding) {
                Ok(records) => records,
                Err(e) => {
                    log::warn!("Error processing file {}: {}", file_path.display(), e);
                    outcome.files_skipped += 1;
                    continue;
                }
            };
            outcome.files_scanned += 1;

            for record in &records {
                if !record.text.to_lowercase().contains(&needle) {
                    continue;
                }

                outcome.matched = true;
                sink.emit(self.build_result(file_path, record, &languages))?;
                outcome.emitted += 1;

                if outcome.emitted >= self.config.match_limit {
                    log::debug!("Match limit {} reached for '{}'", self.config.match_limit, query);
                    return Ok(outcome);
                }
            }
        }

        Ok(outcome)
    }

    fn build_result(
        &self,
        file_path: &Path,
        record: &SubtitleRecord,
        languages: &QueryLanguages,
    ) -> MatchResult {
        let translation = resolver::resolve(
            file_path,
            record.start,
            &languages.primary,
            &languages.secondary,
            self.config.tolerance(),
            &self.config.fallback_encoding,
        )
        .map(|t| SubtitleRef {
            language: languages.secondary_label(),
            file_path: t.file_path,
            start: t.start,
            end: t.end,
            text: normalize(&t.text),
        });

        MatchResult {
            original: SubtitleRef {
                language: languages.primary_label(),
                file_path: file_path.to_path_buf(),
                start: record.start,
                end: record.end,
                text: normalize(&record.text),
            },
            translation,
        }
    }
}
