//! Rules and rule sets.

use std::fmt;
use std::rc::Rc;

use crate::i18n;
use crate::widget::Widget;

/// What a rule looks at: the widget and its extracted value.
pub struct Subject<'a> {
    widget: &'a dyn Widget,
    value: &'a str,
}

impl<'a> Subject<'a> {
    pub fn new(widget: &'a dyn Widget, value: &'a str) -> Self {
        Self { widget, value }
    }

    pub fn widget(&self) -> &'a dyn Widget {
        self.widget
    }

    /// Trimmed value as produced by the adapter registry.
    pub fn value(&self) -> &'a str {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Text shown when a rule fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Fixed text supplied by the caller.
    Text(String),
    /// Catalogue key plus arguments, resolved in the locale active at the
    /// time the rule fails.
    Localized {
        key: &'static str,
        args: Vec<String>,
    },
}

impl Message {
    pub fn localized(key: &'static str) -> Self {
        Self::Localized {
            key,
            args: Vec::new(),
        }
    }

    pub fn localized_with(key: &'static str, args: Vec<String>) -> Self {
        Self::Localized { key, args }
    }

    pub fn resolve(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Localized { key, args } => {
                let args: Vec<&dyn fmt::Display> =
                    args.iter().map(|arg| arg as &dyn fmt::Display).collect();
                i18n::message(key, &args)
            }
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

type Check = Rc<dyn Fn(&Subject<'_>) -> Option<String>>;

/// A single validation rule: `None` when the subject passes, the error
/// message when it fails.
///
/// Rules are immutable and cheap to clone.
#[derive(Clone)]
pub struct Rule {
    check: Check,
}

impl Rule {
    /// A rule from a raw check function.
    pub fn new<F>(check: F) -> Self
    where
        F: Fn(&Subject<'_>) -> Option<String> + 'static,
    {
        Self {
            check: Rc::new(check),
        }
    }

    /// A rule that fails with `message` whenever `test` returns false.
    pub fn predicate<F>(test: F, message: impl Into<Message>) -> Self
    where
        F: Fn(&Subject<'_>) -> bool + 'static,
    {
        let message = message.into();
        Self::new(move |subject| {
            if test(subject) {
                None
            } else {
                Some(message.resolve())
            }
        })
    }

    /// Apply `rule` only while `condition` holds. The condition is
    /// re-evaluated on every check.
    pub fn when<C>(condition: C, rule: Rule) -> Self
    where
        C: Fn() -> bool + 'static,
    {
        Self::new(move |subject| if condition() { rule.check(subject) } else { None })
    }

    pub fn check(&self, subject: &Subject<'_>) -> Option<String> {
        (self.check)(subject)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").finish_non_exhaustive()
    }
}

/// Ordered rules of one field.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn extend(&mut self, other: RuleSet) {
        self.rules.extend(other.rules);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// First failure in attachment order, or `None` when every rule passes.
    pub fn evaluate(&self, subject: &Subject<'_>) -> Option<String> {
        self.rules.iter().find_map(|rule| rule.check(subject))
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}
