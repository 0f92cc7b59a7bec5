//! Нормализация текста субтитров для вывода

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SPACE_RUN_RE: Regex = Regex::new(r"[ \n]+").unwrap();
}

/// Теги курсива, удаляемые как подстроки
const ITALIC_TAGS: [&str; 2] = ["<i>", "</i>"];

/// Нормализовать текст субтитра
///
/// Удаляет теги курсива, схлопывает последовательности пробелов и переводов
/// строк в один пробел и обрезает пробелы по краям. Остальная разметка
/// сохраняется как есть.
pub fn normalize(raw_text: &str) -> String {
    let mut text = raw_text.replace('\r', "");
    for tag in ITALIC_TAGS {
        text = text.replace(tag, "");
    }
    SPACE_RUN_RE.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_italics_and_whitespace() {
        assert_eq!(normalize("Hello<i>\n  world</i>  "), "Hello world");
    }

    #[test]
    fn test_other_markup_is_kept() {
        assert_eq!(normalize("<b>Bold</b>\n<i>it</i>"), "<b>Bold</b> it");
        assert_eq!(normalize("<font color=\"red\">x</font>"), "<font color=\"red\">x</font>");
    }

    #[test]
    fn test_tag_between_spaces_collapses() {
        assert_eq!(normalize("a <i> b"), "a b");
        assert_eq!(normalize("   \n "), "");
    }
}
