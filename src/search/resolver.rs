//! Поиск перевода в парном файле на другом языке
//!
//! Файлы считаются переводами друг друга, если лежат в одной директории и
//! их имена отличаются только суффиксом языка: `movie_en.srt` ↔ `movie_ru.srt`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::subtitle::{find_closest, parse_srt_file, SubtitleRecord};

/// Найденный перевод
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub text: String,
    pub start: Duration,
    pub end: Duration,
    pub file_path: PathBuf,
}

/// Путь к парному файлу: `_{primary}` заменяется на `_{secondary}` в имени файла
///
/// Возвращает None, если у пути нет имени файла.
pub fn sibling_path(
    primary_file_path: &Path,
    primary_suffix: &str,
    secondary_suffix: &str,
) -> Option<PathBuf> {
    let file_name = primary_file_path.file_name()?.to_string_lossy();
    let sibling_name = file_name.replace(
        &format!("_{}", primary_suffix),
        &format!("_{}", secondary_suffix),
    );
    Some(match primary_file_path.parent() {
        Some(dir) => dir.join(sibling_name),
        None => PathBuf::from(sibling_name),
    })
}

/// Найти перевод субтитра, начинающегося в `start_time`
///
/// Отсутствие парного файла, ошибка его разбора или отсутствие записи в
/// пределах `tolerance` дают None: перевод ищется по возможности и никогда
/// не прерывает основной поиск.
pub fn resolve(
    primary_file_path: &Path,
    start_time: Duration,
    primary_suffix: &str,
    secondary_suffix: &str,
    tolerance: Duration,
    fallback_encoding: &str,
) -> Option<Translation> {
    let other_path = sibling_path(primary_file_path, primary_suffix, secondary_suffix)?;

    if other_path == primary_file_path || !other_path.is_file() {
        return None;
    }

    let records: Vec<SubtitleRecord> = match parse_srt_file(&other_path, fallback_encoding) {
        Ok(records) => records,
        Err(e) => {
            log::warn!(
                "Failed to load translation file {}: {}",
                other_path.display(),
                e
            );
            return None;
        }
    };

    // Ближайшая запись с пустым текстом означает отсутствие перевода,
    // следующая по близости запись не рассматривается
    let record = find_closest(start_time, &records, tolerance)?;
    if record.text.trim().is_empty() {
        return None;
    }

    Some(Translation {
        text: record.text.clone(),
        start: record.start,
        end: record.end,
        file_path: other_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TOLERANCE: Duration = Duration::from_secs(1);

    fn lookup(primary: &Path) -> Option<Translation> {
        resolve(primary, Duration::from_secs(1), "en", "ru", TOLERANCE, "windows-1251")
    }

    #[test]
    fn test_sibling_path_replaces_suffix() {
        let path = Path::new("/subs/show/movie_en.srt");
        assert_eq!(
            sibling_path(path, "en", "ru").unwrap(),
            PathBuf::from("/subs/show/movie_ru.srt")
        );
    }

    #[test]
    fn test_missing_sibling_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("movie_en.srt");
        fs::write(&primary, "1\n00:00:01,000 --> 00:00:02,000\nHello\n").unwrap();

        assert!(lookup(&primary).is_none());
    }

    #[test]
    fn test_resolves_closest_record() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("movie_en.srt");
        let secondary = dir.path().join("movie_ru.srt");
        fs::write(&primary, "1\n00:00:01,000 --> 00:00:02,000\nHello\n").unwrap();
        fs::write(
            &secondary,
            "1\n00:00:00,100 --> 00:00:00,900\nРаньше\n\n2\n00:00:01,200 --> 00:00:02,100\nПривет\n",
        )
        .unwrap();

        let translation = lookup(&primary).unwrap();
        assert_eq!(translation.text, "Привет");
        assert_eq!(translation.start, Duration::from_millis(1200));
        assert_eq!(translation.file_path, secondary);
    }

    #[test]
    fn test_blank_closest_record_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("movie_en.srt");
        fs::write(&primary, "1\n00:00:01,000 --> 00:00:02,000\nHello\n").unwrap();
        fs::write(
            dir.path().join("movie_ru.srt"),
            "1\n00:00:01,200 --> 00:00:02,000\n   \n\n2\n00:00:01,500 --> 00:00:02,100\nПривет\n",
        )
        .unwrap();

        assert!(lookup(&primary).is_none());
    }

    #[test]
    fn test_corrupt_sibling_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("movie_en.srt");
        fs::write(&primary, "1\n00:00:01,000 --> 00:00:02,000\nHello\n").unwrap();
        fs::write(
            dir.path().join("movie_ru.srt"),
            "1\nxx:00:01,000 --> 00:00:02,000\nБитый\n",
        )
        .unwrap();

        assert!(lookup(&primary).is_none());
    }
}
