//! Выбор основного языка запроса
//!
//! Язык определяется эвристикой: если в запросе есть хотя бы один символ
//! вне диапазона 7-битного ASCII, основным считается не-латинский язык
//! (по умолчанию "ru"), иначе латинский ("en"). Это не настоящее
//! определение языка: например, запрос "café" будет искаться в русских файлах.

use crate::config::SearchConfig;

/// Пара языков для одного запроса
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLanguages {
    /// Суффикс языка, в файлах которого ищутся совпадения
    pub primary: String,
    /// Суффикс языка, в котором ищется перевод
    pub secondary: String,
}

impl QueryLanguages {
    /// Определить языки для запроса
    pub fn classify(query: &str, config: &SearchConfig) -> Self {
        let (primary, secondary) = if is_non_latin(query) {
            (&config.non_latin_suffix, &config.latin_suffix)
        } else {
            (&config.latin_suffix, &config.non_latin_suffix)
        };

        Self {
            primary: primary.clone(),
            secondary: secondary.clone(),
        }
    }

    /// Метка основного языка для вывода ("EN", "RU")
    pub fn primary_label(&self) -> String {
        self.primary.to_uppercase()
    }

    /// Метка языка перевода для вывода
    pub fn secondary_label(&self) -> String {
        self.secondary.to_uppercase()
    }
}

/// Содержит ли текст символы вне ASCII
pub fn is_non_latin(text: &str) -> bool {
    !text.is_ascii()
}
