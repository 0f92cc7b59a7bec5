//! Модуль для парсинга субтитров
//!
//! Этот модуль содержит функции для парсинга SRT файлов.

use std::fs;
use std::path::Path;
use std::time::Duration;

use lazy_static::lazy_static;
use regex::Regex;

use super::SubtitleRecord;
use crate::error::{Result, SubSearchError};

lazy_static! {
    static ref TIMING_RE: Regex = Regex::new(
        r"^\s*(\d+):(\d{1,2}):(\d{1,2})[,.](\d{1,3})\s*-->\s*(\d+):(\d{1,2}):(\d{1,2})[,.](\d{1,3})"
    )
    .unwrap();
}

/// Парсинг SRT файла
///
/// Файл читается целиком и сразу закрывается. Если содержимое не является
/// корректным UTF-8, оно декодируется из `fallback_encoding`.
pub fn parse_srt_file<P: AsRef<Path>>(
    path: P,
    fallback_encoding: &str,
) -> Result<Vec<SubtitleRecord>> {
    let bytes = fs::read(&path)?;
    let content = decode_content(&bytes, fallback_encoding)?;

    parse_srt_str(&content).map_err(|e| match e {
        SubSearchError::InvalidFormat(msg) => {
            SubSearchError::InvalidFormat(format!("{}: {}", path.as_ref().display(), msg))
        }
        other => other,
    })
}

/// Декодирование содержимого файла
fn decode_content(bytes: &[u8], fallback_encoding: &str) -> Result<String> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Ok(text.to_string());
    }

    let encoding = encoding_rs::Encoding::for_label(fallback_encoding.as_bytes()).ok_or_else(|| {
        SubSearchError::Configuration(format!("Unknown fallback encoding: {}", fallback_encoding))
    })?;

    let (decoded, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(SubSearchError::SubtitleParsing(format!(
            "File is neither UTF-8 nor valid {}",
            encoding.name()
        )));
    }

    Ok(decoded.into_owned())
}

/// Парсинг содержимого SRT
///
/// Записи возвращаются в порядке следования в файле.
pub fn parse_srt_str(content: &str) -> Result<Vec<SubtitleRecord>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut records = Vec::new();
    let mut current_block: Vec<&str> = Vec::new();

    for line in content.lines() {
        if line.trim().is_empty() {
            if !current_block.is_empty() {
                if let Some(record) = parse_block(&current_block)? {
                    records.push(record);
                }
                current_block.clear();
            }
        } else {
            current_block.push(line);
        }
    }

    // Обрабатываем последний блок, если он есть
    if !current_block.is_empty() {
        if let Some(record) = parse_block(&current_block)? {
            records.push(record);
        }
    }

    Ok(records)
}

/// Парсинг одного блока субтитра
fn parse_block(lines: &[&str]) -> Result<Option<SubtitleRecord>> {
    let Some(timing_pos) = lines.iter().position(|line| line.contains("-->")) else {
        log::debug!("Skipping subtitle block without timing line: {:?}", lines.first());
        return Ok(None);
    };

    let (start, end) = parse_timing_line(lines[timing_pos])?;

    let text = lines[timing_pos + 1..]
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<&str>>()
        .join("\n");

    Ok(Some(SubtitleRecord::new(text, start, end)))
}

/// Парсинг строки времени вида "HH:MM:SS,mmm --> HH:MM:SS,mmm"
fn parse_timing_line(line: &str) -> Result<(Duration, Duration)> {
    let invalid = |reason: &str| {
        SubSearchError::InvalidFormat(format!("{}: {}", reason, line.trim()))
    };

    let caps = TIMING_RE
        .captures(line)
        .ok_or_else(|| invalid("Invalid timing line"))?;

    let field = |i: usize| -> Result<u64> {
        caps[i]
            .parse::<u64>()
            .map_err(|_| invalid("Invalid number in timing line"))
    };
    let millis = |i: usize| -> Result<u64> {
        let value = field(i)?;
        Ok(match caps[i].len() {
            1 => value * 100,
            2 => value * 10,
            _ => value,
        })
    };

    let start = to_duration(field(1)?, field(2)?, field(3)?, millis(4)?)
        .ok_or_else(|| invalid("Timestamp out of range"))?;
    let end = to_duration(field(5)?, field(6)?, field(7)?, millis(8)?)
        .ok_or_else(|| invalid("Timestamp out of range"))?;

    Ok((start, end))
}

/// None, если значение не помещается в u64 миллисекунд
fn to_duration(hours: u64, minutes: u64, seconds: u64, milliseconds: u64) -> Option<Duration> {
    let total = hours
        .checked_mul(3_600_000)?
        .checked_add(minutes.checked_mul(60_000)?)?
        .checked_add(seconds.checked_mul(1000)?)?
        .checked_add(milliseconds)?;
    Some(Duration::from_millis(total))
}

/// Форматирование времени в нотации SubRip: "HH:MM:SS,mmm"
pub fn format_timestamp(time: Duration) -> String {
    let total_ms = time.as_millis();
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let milliseconds = total_ms % 1000;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, milliseconds)
}
