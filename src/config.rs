//! Модуль конфигурации библиотеки subsearch
//!
//! Этот модуль содержит настройки сервера поиска и параметры сопоставления субтитров.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SubSearchError};

/// Имя переменной окружения с путем к JSON-файлу конфигурации
pub const CONFIG_ENV_VAR: &str = "SUBSEARCH_CONFIG";

/// Конфигурация сервера и движка поиска
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Адрес, на котором слушает сервер (и к которому подключается клиент)
    pub host: String,
    /// Порт сервера
    pub port: u16,
    /// Корневая директория с субтитрами
    pub directory: PathBuf,
    /// Допустимое расхождение времени начала субтитров в миллисекундах
    pub tolerance_ms: u64,
    /// Максимальное количество совпадений на один запрос
    pub match_limit: usize,
    /// Суффикс языка для запросов только из ASCII символов
    pub latin_suffix: String,
    /// Суффикс языка для запросов, содержащих не-ASCII символы
    pub non_latin_suffix: String,
    /// Расширение файлов субтитров (без точки)
    pub extension: String,
    /// Кодировка для файлов, не являющихся корректным UTF-8
    pub fallback_encoding: String,
    /// Размер буфера кадров между поиском и соединением
    pub channel_capacity: usize,
    /// Максимальная длина строки запроса в байтах
    pub max_query_bytes: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 65432,
            directory: PathBuf::from("."),
            tolerance_ms: 1000,
            match_limit: 12,
            latin_suffix: "en".to_string(),
            non_latin_suffix: "ru".to_string(),
            extension: "srt".to_string(),
            fallback_encoding: "windows-1251".to_string(),
            channel_capacity: 16,
            max_query_bytes: 1024,
        }
    }
}

impl SearchConfig {
    /// Загрузить конфигурацию из JSON файла; отсутствующие поля берутся по умолчанию
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            SubSearchError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let config: SearchConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Загрузить конфигурацию из файла, указанного в SUBSEARCH_CONFIG, либо взять значения по умолчанию
    pub fn from_env() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => {
                log::info!("Loading configuration from {}", path);
                Self::from_json_file(path.trim())
            }
            _ => Ok(Self::default()),
        }
    }

    /// Проверить корректность значений
    pub fn validate(&self) -> Result<()> {
        if self.match_limit == 0 {
            return Err(SubSearchError::Configuration(
                "match_limit must be greater than zero".to_string(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(SubSearchError::Configuration(
                "channel_capacity must be greater than zero".to_string(),
            ));
        }
        if self.max_query_bytes == 0 {
            return Err(SubSearchError::Configuration(
                "max_query_bytes must be greater than zero".to_string(),
            ));
        }
        if self.latin_suffix.is_empty() || self.non_latin_suffix.is_empty() {
            return Err(SubSearchError::Configuration(
                "language suffixes must not be empty".to_string(),
            ));
        }
        if self.latin_suffix == self.non_latin_suffix {
            return Err(SubSearchError::Configuration(format!(
                "language suffixes must differ, both are '{}'",
                self.latin_suffix
            )));
        }
        if self.extension.is_empty() {
            return Err(SubSearchError::Configuration(
                "subtitle extension must not be empty".to_string(),
            ));
        }
        if encoding_rs::Encoding::for_label(self.fallback_encoding.as_bytes()).is_none() {
            return Err(SubSearchError::Configuration(format!(
                "unknown fallback encoding: {}",
                self.fallback_encoding
            )));
        }
        Ok(())
    }

    /// Окно допустимого расхождения по времени
    pub fn tolerance(&self) -> Duration {
        Duration::from_millis(self.tolerance_ms)
    }

    /// Адрес для bind/connect в виде "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = SearchConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tolerance(), Duration::from_secs(1));
        assert_eq!(config.match_limit, 12);
        assert_eq!(config.address(), "127.0.0.1:65432");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(br#"{"port": 7000, "directory": "/srv/subs", "tolerance_ms": 500}"#)
            .unwrap();

        let config = SearchConfig::from_json_file(&path).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.directory, PathBuf::from("/srv/subs"));
        assert_eq!(config.tolerance(), Duration::from_millis(500));
        assert_eq!(config.latin_suffix, "en");
        assert_eq!(config.non_latin_suffix, "ru");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SearchConfig::default();
        config.non_latin_suffix = "en".to_string();
        assert!(matches!(config.validate(), Err(SubSearchError::Configuration(_))));

        let mut config = SearchConfig::default();
        config.match_limit = 0;
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.max_query_bytes = 0;
        assert!(config.validate().is_err());

        let mut config = SearchConfig::default();
        config.fallback_encoding = "no-such-encoding".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            SearchConfig::from_json_file(&path),
            Err(SubSearchError::Json(_))
        ));
    }
}
