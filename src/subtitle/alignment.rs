//! Сопоставление субтитров по времени начала

use std::time::Duration;

use super::SubtitleRecord;

/// Найти запись с ближайшим к `target` временем начала
///
/// Запись подходит, только если расхождение не превышает `tolerance`.
/// Записи просматриваются целиком, сортировка не требуется. При равном
/// расхождении остается первая встреченная запись.
pub fn find_closest<'a>(
    target: Duration,
    records: &'a [SubtitleRecord],
    tolerance: Duration,
) -> Option<&'a SubtitleRecord> {
    let mut closest: Option<(&SubtitleRecord, Duration)> = None;

    for record in records {
        let diff = time_diff(record.start, target);
        if diff > tolerance {
            continue;
        }
        match closest {
            Some((_, best)) if diff >= best => {}
            _ => closest = Some((record, diff)),
        }
    }

    closest.map(|(record, _)| record)
}

fn time_diff(a: Duration, b: Duration) -> Duration {
    if a > b {
        a - b
    } else {
        b - a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(text: &str, start_ms: u64) -> SubtitleRecord {
        SubtitleRecord::new(
            text,
            Duration::from_millis(start_ms),
            Duration::from_millis(start_ms + 1000),
        )
    }

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_empty_records() {
        assert!(find_closest(Duration::from_millis(500), &[], SECOND).is_none());
    }

    #[test]
    fn test_picks_minimum_difference_unsorted() {
        let records = vec![rec("far", 1900), rec("near", 1100), rec("mid", 600)];
        let found = find_closest(Duration::from_millis(1000), &records, SECOND).unwrap();
        assert_eq!(found.text, "near");
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let records = vec![rec("edge", 2000)];
        assert!(find_closest(Duration::from_millis(1000), &records, SECOND).is_some());
        assert!(find_closest(Duration::from_millis(999), &records, SECOND).is_none());
    }

    #[test]
    fn test_tie_keeps_first_encountered() {
        let records = vec![rec("after", 1200), rec("before", 800), rec("dup", 1200)];
        let found = find_closest(Duration::from_millis(1000), &records, SECOND).unwrap();
        assert_eq!(found.text, "after");
    }

    #[test]
    fn test_nothing_within_tolerance() {
        let records = vec![rec("a", 5000), rec("b", 9000)];
        let tolerance = Duration::from_millis(500);
        assert!(find_closest(Duration::from_millis(1000), &records, tolerance).is_none());
    }
}
