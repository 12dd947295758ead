use crate::widget::WidgetId;

/// Information about a single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Widget the error belongs to (for focusing).
    pub widget_id: WidgetId,
    /// Error message, as shown by the display.
    pub message: String,
}

/// Result of validating every field of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    /// All fields passed validation.
    #[default]
    Valid,
    /// One or more fields failed validation, in field insertion order.
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    pub(crate) fn from_errors(errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    /// Check if all fields passed validation.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Check if any field failed validation.
    pub fn is_invalid(&self) -> bool {
        !self.is_valid()
    }

    /// Get all validation errors.
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Get the first validation error (if any).
    pub fn first_error(&self) -> Option<&FieldError> {
        self.errors().first()
    }

    /// Get the widget ID of the first invalid field.
    pub fn first_invalid_widget(&self) -> Option<WidgetId> {
        self.first_error().map(|e| e.widget_id)
    }

    /// Error message for `widget`, if it failed.
    pub fn error_for(&self, widget: WidgetId) -> Option<&str> {
        self.errors()
            .iter()
            .find(|e| e.widget_id == widget)
            .map(|e| e.message.as_str())
    }
}
