//! Localized default messages.
//!
//! Locale and catalogues are process-wide. Rules resolve their default
//! message when they fail, so switching the locale affects the next
//! evaluation. Display configs hold no text and are not localized.
//!
//! Lookup order: current locale, then English, then `???key???`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{LazyLock, RwLock};

/// Message keys of the built-in catalogues.
pub mod keys {
    pub const REQUIRED: &str = "validation.required";
    pub const MIN_LENGTH: &str = "validation.min_length";
    pub const MAX_LENGTH: &str = "validation.max_length";
    pub const PATTERN: &str = "validation.pattern";
    pub const EMAIL: &str = "validation.email";
    pub const NUMBER: &str = "validation.number";
    pub const INTEGER: &str = "validation.integer";
    pub const MIN: &str = "validation.min";
    pub const MAX: &str = "validation.max";
    pub const BETWEEN: &str = "validation.between";
    pub const DIGITS: &str = "validation.digits";
    pub const URL: &str = "validation.url";
    pub const MATCHES: &str = "validation.matches";
    pub const ONE_OF: &str = "validation.one_of";
}

/// A language tag such as `en` or `th`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(Cow<'static, str>);

impl Locale {
    pub const ENGLISH: Locale = Locale(Cow::Borrowed("en"));
    pub const THAI: Locale = Locale(Cow::Borrowed("th"));

    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    pub fn tag(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::ENGLISH
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type Catalog = HashMap<String, String>;

struct Catalogs {
    current: Locale,
    catalogs: HashMap<Locale, Catalog>,
}

const ENGLISH: &[(&str, &str)] = &[
    (keys::REQUIRED, "This field is required."),
    (keys::MIN_LENGTH, "Must be at least {0} characters."),
    (keys::MAX_LENGTH, "Must be at most {0} characters."),
    (keys::PATTERN, "Invalid format."),
    (keys::EMAIL, "Please enter a valid email address."),
    (keys::NUMBER, "Please enter a valid number."),
    (keys::INTEGER, "Please enter a whole number."),
    (keys::MIN, "Value must be at least {0}."),
    (keys::MAX, "Value must be at most {0}."),
    (keys::BETWEEN, "Value must be between {0} and {1}."),
    (keys::DIGITS, "Must be exactly {0} digits."),
    (keys::URL, "Please enter a valid URL."),
    (keys::MATCHES, "Values do not match."),
    (keys::ONE_OF, "Please select a valid option."),
];

const THAI: &[(&str, &str)] = &[
    (keys::REQUIRED, "กรุณากรอกข้อมูลในช่องนี้"),
    (keys::MIN_LENGTH, "ต้องมีอย่างน้อย {0} ตัวอักษร"),
    (keys::MAX_LENGTH, "ต้องมีไม่เกิน {0} ตัวอักษร"),
    (keys::PATTERN, "รูปแบบไม่ถูกต้อง"),
    (keys::EMAIL, "กรุณากรอกอีเมลให้ถูกต้อง"),
    (keys::NUMBER, "กรุณากรอกตัวเลขให้ถูกต้อง"),
    (keys::INTEGER, "กรุณากรอกจำนวนเต็ม"),
    (keys::MIN, "ค่าต้องไม่น้อยกว่า {0}"),
    (keys::MAX, "ค่าต้องไม่เกิน {0}"),
    (keys::BETWEEN, "ค่าต้องอยู่ระหว่าง {0} ถึง {1}"),
    (keys::DIGITS, "ต้องเป็นตัวเลข {0} หลัก"),
    (keys::URL, "กรุณากรอก URL ให้ถูกต้อง"),
    (keys::MATCHES, "ข้อมูลไม่ตรงกัน"),
    (keys::ONE_OF, "กรุณาเลือกตัวเลือกที่ถูกต้อง"),
];

fn catalog_from(entries: &[(&str, &str)]) -> Catalog {
    entries
        .iter()
        .map(|(key, text)| (key.to_string(), text.to_string()))
        .collect()
}

static STATE: LazyLock<RwLock<Catalogs>> = LazyLock::new(|| {
    let mut catalogs = HashMap::new();
    catalogs.insert(Locale::ENGLISH, catalog_from(ENGLISH));
    catalogs.insert(Locale::THAI, catalog_from(THAI));
    RwLock::new(Catalogs {
        current: Locale::default(),
        catalogs,
    })
});

fn read<R>(f: impl FnOnce(&Catalogs) -> R) -> R {
    let guard = STATE.read().unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&guard)
}

fn write<R>(f: impl FnOnce(&mut Catalogs) -> R) -> R {
    let mut guard = STATE.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut guard)
}

/// Switch the locale used for default messages.
pub fn set_locale(locale: Locale) {
    log::debug!("i18n: locale set to {}", locale);
    write(|state| state.current = locale);
}

pub fn locale() -> Locale {
    read(|state| state.current.clone())
}

/// Add or override messages for `locale`.
///
/// Entries are merged into an existing catalogue; keys missing from a
/// non-English catalogue fall back to English.
pub fn register_catalog<K, V>(locale: Locale, entries: impl IntoIterator<Item = (K, V)>)
where
    K: Into<String>,
    V: Into<String>,
{
    write(|state| {
        let catalog = state.catalogs.entry(locale).or_default();
        for (key, text) in entries {
            catalog.insert(key.into(), text.into());
        }
    });
}

/// Resolve `key` in the current locale and substitute `{0}`, `{1}`, ...
pub fn message(key: &str, args: &[&dyn fmt::Display]) -> String {
    let template = read(|state| {
        state
            .catalogs
            .get(&state.current)
            .and_then(|catalog| catalog.get(key))
            .or_else(|| {
                state
                    .catalogs
                    .get(&Locale::ENGLISH)
                    .and_then(|catalog| catalog.get(key))
            })
            .cloned()
    });

    match template {
        Some(template) => substitute(&template, args),
        None => {
            log::debug!("i18n: no message for key '{}'", key);
            format!("???{}???", key)
        }
    }
}

/// Replace `{n}` with the n-th argument in one left-to-right pass, so text
/// coming from an argument is never substituted again.
fn substitute(template: &str, args: &[&dyn fmt::Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let argument = tail.find('}').and_then(|close| {
            let index: usize = tail[..close].parse().ok()?;
            args.get(index).map(|arg| (close, arg))
        });
        match argument {
            Some((close, arg)) => {
                out.push_str(&arg.to_string());
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_replaced_by_position() {
        let out = substitute("{1} then {0}, {0} again", &[&"a", &2]);
        assert_eq!(out, "2 then a, a again");
    }

    #[test]
    fn unused_placeholders_stay() {
        assert_eq!(substitute("between {0} and {1}", &[&1]), "between 1 and {1}");
    }

    #[test]
    fn argument_text_is_not_substituted_again() {
        let out = substitute("{0} and {1}", &[&"{1}", &"b"]);
        assert_eq!(out, "{1} and b");
    }

    #[test]
    fn stray_braces_are_kept() {
        assert_eq!(substitute("{x} {0} {", &[&7]), "{x} 7 {");
    }
}
