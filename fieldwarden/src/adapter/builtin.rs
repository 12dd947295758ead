use std::rc::Rc;

use super::ValueAdapter;
use crate::headless::{Choice, TextInput};
use crate::widget::{ListenerKey, Subscription, Widget};

/// Free-text inputs: the trimmed text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextInputAdapter;

impl ValueAdapter for TextInputAdapter {
    fn supports(&self, widget: &dyn Widget) -> bool {
        widget.as_any().is::<TextInput>()
    }

    fn value(&self, widget: &dyn Widget) -> String {
        widget
            .as_any()
            .downcast_ref::<TextInput>()
            .map(|input| input.text().trim().to_string())
            .unwrap_or_default()
    }

    fn subscribe(
        &self,
        widget: &dyn Widget,
        key: ListenerKey,
        on_change: Rc<dyn Fn()>,
    ) -> Option<Subscription> {
        let input = widget.as_any().downcast_ref::<TextInput>()?;
        Some(input.on_change(key, on_change))
    }
}

/// Selection widgets: the selected option, or `""` when nothing is selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChoiceAdapter;

impl ValueAdapter for ChoiceAdapter {
    fn supports(&self, widget: &dyn Widget) -> bool {
        widget.as_any().is::<Choice>()
    }

    fn value(&self, widget: &dyn Widget) -> String {
        widget
            .as_any()
            .downcast_ref::<Choice>()
            .and_then(|choice| choice.selected_option())
            .map(|option| option.trim().to_string())
            .unwrap_or_default()
    }

    fn subscribe(
        &self,
        widget: &dyn Widget,
        key: ListenerKey,
        on_change: Rc<dyn Fn()>,
    ) -> Option<Subscription> {
        let choice = widget.as_any().downcast_ref::<Choice>()?;
        Some(choice.on_change(key, on_change))
    }
}
