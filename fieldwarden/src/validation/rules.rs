//! Built-in rules.
//!
//! Every rule except [`required`] passes on an empty value, so optional
//! fields only need `required` left out. Each rule comes in two flavours:
//! the plain one fails with a localized default message, the `_msg` one
//! with the caller's text.

use std::sync::LazyLock;

use regex::Regex;

use super::rule::{Message, Rule, Subject};
use crate::error::FormError;
use crate::i18n::keys;

static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d+(\.\d+)?$").unwrap_or_else(|err| unreachable!("number pattern: {err}"))
});

static INTEGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?\d+$").unwrap_or_else(|err| unreachable!("integer pattern: {err}"))
});

static DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+$").unwrap_or_else(|err| unreachable!("digits pattern: {err}"))
});

const URL_SCHEMES: &[&str] = &["http", "https", "ftp", "file", "mailto", "jar"];

fn char_count(subject: &Subject<'_>) -> usize {
    subject.value().chars().count()
}

fn parse_number(subject: &Subject<'_>) -> Option<f64> {
    subject.value().parse::<f64>().ok()
}

// =============================================================================
// Presence and length
// =============================================================================

pub fn required() -> Rule {
    required_msg(Message::localized(keys::REQUIRED))
}

pub fn required_msg(message: impl Into<Message>) -> Rule {
    Rule::predicate(|subject| !subject.is_empty(), message)
}

/// Required only while `condition` holds.
pub fn required_when<C>(condition: C) -> Rule
where
    C: Fn() -> bool + 'static,
{
    Rule::when(condition, required())
}

pub fn min_length(min: usize) -> Rule {
    min_length_msg(min, Message::localized_with(keys::MIN_LENGTH, vec![min.to_string()]))
}

pub fn min_length_msg(min: usize, message: impl Into<Message>) -> Rule {
    Rule::predicate(move |subject| subject.is_empty() || char_count(subject) >= min, message)
}

pub fn max_length(max: usize) -> Rule {
    max_length_msg(max, Message::localized_with(keys::MAX_LENGTH, vec![max.to_string()]))
}

pub fn max_length_msg(max: usize, message: impl Into<Message>) -> Rule {
    Rule::predicate(move |subject| subject.is_empty() || char_count(subject) <= max, message)
}

/// Length between `min` and `max` characters, both inclusive.
pub fn length(min: usize, max: usize) -> Result<[Rule; 2], FormError> {
    if min > max {
        return Err(FormError::InvalidLength(format!(
            "min length {} is greater than max length {}",
            min, max
        )));
    }
    Ok([min_length(min), max_length(max)])
}

// =============================================================================
// Format
// =============================================================================

/// The whole value must match `pattern`.
pub fn pattern(pattern: &str) -> Result<Rule, FormError> {
    pattern_msg(pattern, Message::localized(keys::PATTERN))
}

pub fn pattern_msg(pattern: &str, message: impl Into<Message>) -> Result<Rule, FormError> {
    let anchored = format!("^(?:{})$", pattern);
    let regex = Regex::new(&anchored).map_err(|err| FormError::invalid_pattern(pattern, &err))?;
    Ok(Rule::predicate(
        move |subject| subject.is_empty() || regex.is_match(subject.value()),
        message,
    ))
}

pub fn email() -> Rule {
    email_msg(Message::localized(keys::EMAIL))
}

pub fn email_msg(message: impl Into<Message>) -> Rule {
    Rule::predicate(
        |subject| subject.is_empty() || email_address::EmailAddress::is_valid(subject.value()),
        message,
    )
}

/// Optional minus sign, digits, optional decimal part.
pub fn number() -> Rule {
    number_msg(Message::localized(keys::NUMBER))
}

pub fn number_msg(message: impl Into<Message>) -> Rule {
    Rule::predicate(|subject| subject.is_empty() || NUMBER.is_match(subject.value()), message)
}

pub fn integer() -> Rule {
    integer_msg(Message::localized(keys::INTEGER))
}

pub fn integer_msg(message: impl Into<Message>) -> Rule {
    Rule::predicate(|subject| subject.is_empty() || INTEGER.is_match(subject.value()), message)
}

/// Exactly `count` decimal digits.
pub fn digits(count: usize) -> Rule {
    digits_msg(count, Message::localized_with(keys::DIGITS, vec![count.to_string()]))
}

pub fn digits_msg(count: usize, message: impl Into<Message>) -> Rule {
    Rule::predicate(
        move |subject| {
            subject.is_empty() || (DIGITS.is_match(subject.value()) && char_count(subject) == count)
        },
        message,
    )
}

/// An absolute URL with a well-known scheme.
pub fn url() -> Rule {
    url_msg(Message::localized(keys::URL))
}

pub fn url_msg(message: impl Into<Message>) -> Rule {
    Rule::predicate(
        |subject| {
            subject.is_empty()
                || url::Url::parse(subject.value())
                    .map(|parsed| URL_SCHEMES.contains(&parsed.scheme()))
                    .unwrap_or(false)
        },
        message,
    )
}

// =============================================================================
// Numeric ranges
// =============================================================================
//
// Values that do not parse as numbers pass; pair these with `number()`.

pub fn min(min: f64) -> Rule {
    min_msg(min, Message::localized_with(keys::MIN, vec![min.to_string()]))
}

pub fn min_msg(min: f64, message: impl Into<Message>) -> Rule {
    Rule::predicate(
        move |subject| parse_number(subject).is_none_or(|value| value >= min),
        message,
    )
}

pub fn max(max: f64) -> Rule {
    max_msg(max, Message::localized_with(keys::MAX, vec![max.to_string()]))
}

pub fn max_msg(max: f64, message: impl Into<Message>) -> Rule {
    Rule::predicate(
        move |subject| parse_number(subject).is_none_or(|value| value <= max),
        message,
    )
}

/// Inclusive numeric range.
pub fn between(min: f64, max: f64) -> Result<Rule, FormError> {
    between_msg(
        min,
        max,
        Message::localized_with(keys::BETWEEN, vec![min.to_string(), max.to_string()]),
    )
}

pub fn between_msg(min: f64, max: f64, message: impl Into<Message>) -> Result<Rule, FormError> {
    if min.is_nan() || max.is_nan() || min > max {
        return Err(FormError::InvalidRange { min, max });
    }
    Ok(Rule::predicate(
        move |subject| parse_number(subject).is_none_or(|value| (min..=max).contains(&value)),
        message,
    ))
}

// =============================================================================
// Comparisons
// =============================================================================

/// Equal to whatever `other` returns at evaluation time (trimmed).
pub fn matches_value<F>(other: F) -> Rule
where
    F: Fn() -> String + 'static,
{
    matches_value_msg(other, Message::localized(keys::MATCHES))
}

pub fn matches_value_msg<F>(other: F, message: impl Into<Message>) -> Rule
where
    F: Fn() -> String + 'static,
{
    Rule::predicate(
        move |subject| subject.is_empty() || other().trim() == subject.value(),
        message,
    )
}

/// One of a fixed set of values.
pub fn one_of<I, S>(values: I) -> Rule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    one_of_msg(values, Message::localized(keys::ONE_OF))
}

pub fn one_of_msg<I, S>(values: I, message: impl Into<Message>) -> Rule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = values.into_iter().map(Into::into).collect();
    Rule::predicate(
        move |subject| subject.is_empty() || allowed.iter().any(|value| value == subject.value()),
        message,
    )
}

/// A rule from an arbitrary check. Provided for symmetry with the other
/// constructors; identical to [`Rule::new`].
pub fn custom<F>(check: F) -> Rule
where
    F: Fn(&Subject<'_>) -> Option<String> + 'static,
{
    Rule::new(check)
}

/// Fails with `message` whenever `test` returns false.
pub fn custom_msg<F>(test: F, message: impl Into<Message>) -> Rule
where
    F: Fn(&str) -> bool + 'static,
{
    Rule::predicate(move |subject| test(subject.value()), message)
}
