use anchorage::text::{display_width, layout_lines, wrap};
use anchorage::{CellMetrics, TextMetrics};

#[test]
fn test_display_width_ascii() {
    assert_eq!(display_width("hello"), 5);
    assert_eq!(display_width(""), 0);
}

#[test]
fn test_display_width_cjk() {
    assert_eq!(display_width("日本語"), 6);
    assert_eq!(display_width("a日b"), 4);
}

#[test]
fn test_wrap_breaks_between_words() {
    let lines = wrap(&CellMetrics::default(), "hello world foo bar", 11);
    assert_eq!(lines, vec!["hello world", "foo bar"]);
}

#[test]
fn test_wrap_splits_word_wider_than_limit() {
    let lines = wrap(&CellMetrics::default(), "superlongword", 5);
    assert_eq!(lines, vec!["super", "longw", "ord"]);
}

#[test]
fn test_wrap_empty() {
    assert_eq!(wrap(&CellMetrics::default(), "", 10), vec![""]);
    assert!(wrap(&CellMetrics::default(), "text", 0).is_empty());
}

#[test]
fn test_wrap_measures_wide_characters() {
    let lines = wrap(&CellMetrics::default(), "日本語", 4);
    assert_eq!(lines, vec!["日本", "語"]);
}

#[test]
fn test_wrap_long_word_after_short_one() {
    let lines = wrap(&CellMetrics::default(), "go abcdefgh", 4);
    assert_eq!(lines, vec!["go", "abcd", "efgh"]);
}

#[test]
fn test_wrap_keeps_explicit_breaks() {
    let lines = wrap(&CellMetrics::default(), "one two\n\nthree", 20);
    assert_eq!(lines, vec!["one two", "", "three"]);
}

#[test]
fn test_wrap_character_wider_than_limit_gets_own_line() {
    let lines = wrap(&CellMetrics::default(), "日a", 1);
    assert_eq!(lines, vec!["日", "a"]);
}

#[test]
fn test_cell_metrics_scale_columns() {
    let metrics = CellMetrics::new(7, 16);
    assert_eq!(metrics.text_width("abc"), 21);
    assert_eq!(metrics.text_width("日"), 14);
    assert_eq!(metrics.line_height(), 16);
}

#[test]
fn test_cell_metrics_default_is_one_cell() {
    let metrics = CellMetrics::default();
    assert_eq!(metrics.text_width("hello"), 5);
    assert_eq!(metrics.line_height(), 1);
}

#[test]
fn test_layout_lines_without_limit_keeps_explicit_breaks() {
    let metrics = CellMetrics::default();
    let lines = layout_lines(&metrics, "first line\nsecond", None);
    assert_eq!(lines, vec!["first line", "second"]);
}

#[test]
fn test_layout_lines_wraps_in_metric_units() {
    // 8 px per column, 40 px budget => 5 columns
    let metrics = CellMetrics::new(8, 16);
    let lines = layout_lines(&metrics, "abc defg", Some(40));
    assert_eq!(lines, vec!["abc", "defg"]);
}
