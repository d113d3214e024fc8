//! Stat-line detection and the per-page character width estimate.

use tracing::debug;

use crate::config::ExtractionConfig;
use crate::geometry::Bounded;
use crate::model::VALUE_COLUMNS;
use crate::ocr::lines::{Line, PaddedLine};
use crate::ocr::Page;
use crate::parsing::values::is_data_token;

/// True if the line looks like a table data row: more than five words, the
/// last four are values or placeholders, and the word before them is not.
///
/// The fifth-from-last test keeps a numeric tail inside a name (e.g. a year)
/// from shifting the value columns.
pub fn is_stat_line(line: &Line<'_>, config: &ExtractionConfig) -> bool {
    let texts = line.word_texts();
    if texts.len() <= VALUE_COLUMNS + 1 {
        return false;
    }

    let (head, tail) = texts.split_at(texts.len() - VALUE_COLUMNS);
    let is_data = |t: &String| is_data_token(t, &config.ignorable_chars);

    tail.iter().all(is_data) && head.last().is_some_and(|w| !is_data(w))
}

pub fn stat_lines<'a, 'b>(
    lines: &'b [Line<'a>],
    config: &ExtractionConfig,
) -> Vec<&'b Line<'a>> {
    lines.iter().filter(|l| is_stat_line(l, config)).collect()
}

/// Estimated width of one character on the page, used only for rendering.
///
/// Median symbol width over all stat lines divided by the character count of
/// the widest stat line. Pages without stat lines estimate zero.
pub fn estimate_char_width(page: &Page, config: &ExtractionConfig) -> f64 {
    let lines = page.lines(config);
    let stats = stat_lines(&lines, config);

    let Some(widest) = stats.iter().max_by(|a, b| a.width().total_cmp(&b.width())) else {
        debug!(page = page.number, "no stat lines, char width estimate is 0");
        return 0.0;
    };

    let widths: Vec<f64> = stats
        .iter()
        .flat_map(|l| l.words().iter())
        .flat_map(|w| w.symbols.iter())
        .map(|s| s.width())
        .collect();

    let chars = widest.text().chars().count();
    match median(widths) {
        Some(m) if chars > 0 => m / chars as f64,
        _ => 0.0,
    }
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// Every reconstructed line of the page, indented to its printed position.
pub fn render_page(page: &Page, config: &ExtractionConfig, stat_only: bool) -> Vec<String> {
    let char_width = estimate_char_width(page, config);
    page.lines(config)
        .into_iter()
        .filter(|l| !stat_only || is_stat_line(l, config))
        .map(|line| {
            PaddedLine {
                line,
                char_width,
                print_scale: config.print_scale,
            }
            .to_string()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::test_support::{page_of, row};

    fn line_of<'a>(words: &'a [crate::ocr::Word]) -> Line<'a> {
        Line::new(words.iter().collect(), 2)
    }

    #[test]
    fn test_five_words_is_never_a_stat_line() {
        let words = row(&["Odra", "12", "-", "0,5", "-"], 0.30, 0.05);
        assert!(!is_stat_line(&line_of(&words), &ExtractionConfig::default()));
    }

    #[test]
    fn test_stat_line_with_two_word_name() {
        let words = row(&["Odra", "zachorowania", "12", "-", "0,5", "3"], 0.30, 0.05);
        assert!(is_stat_line(&line_of(&words), &ExtractionConfig::default()));
    }

    #[test]
    fn test_numeric_fifth_from_last_rejected() {
        let words = row(&["Grypa", "2018", "12", "-", "0,5", "3"], 0.30, 0.05);
        assert!(!is_stat_line(&line_of(&words), &ExtractionConfig::default()));
    }

    #[test]
    fn test_non_numeric_tail_rejected() {
        let words = row(&["Tabela", "1", "Zachorowania", "w", "okresie", "2018"], 0.30, 0.05);
        assert!(!is_stat_line(&line_of(&words), &ExtractionConfig::default()));
    }

    #[test]
    fn test_estimate_without_stat_lines_is_zero() {
        let page = page_of(row(&["Meldunek", "epidemiologiczny"], 0.1, 0.1));
        assert_eq!(estimate_char_width(&page, &ExtractionConfig::default()), 0.0);
        assert_eq!(estimate_char_width(&page_of(vec![]), &ExtractionConfig::default()), 0.0);
    }

    #[test]
    fn test_estimate_uses_widest_line_and_median_symbol() {
        // Every symbol of an n-char word is word_width / n wide.
        let mut words = row(&["Ospa", "wietrzna", "120", "11", "1", "-"], 0.30, 0.06);
        words.extend(row(&["Odra", "razem", "12", "3", "40", "5"], 0.50, 0.05));
        let page = page_of(words);
        let config = ExtractionConfig::default();

        let lines = page.lines(&config);
        assert_eq!(stat_lines(&lines, &config).len(), 2);

        // 34 symbol widths; the two middle ones are 0.0125 and 0.015.
        // The widest line is "Ospa wietrzna 120 11 1 -" with 24 chars.
        let estimate = estimate_char_width(&page, &config);
        assert!((estimate - 0.01375 / 24.0).abs() < 1e-9, "estimate was {estimate}");
    }

    #[test]
    fn test_render_page_marks_indentation() {
        let words = row(&["Odra", "zachorowania", "12", "-", "0,5", "3"], 0.30, 0.05);
        let page = page_of(words);
        let rendered = render_page(&page, &ExtractionConfig::default(), true);
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].trim_start().starts_with("Odra zachorowania 12 - 0,5 3"));
        assert!(rendered[0].starts_with(' '));
    }
}
