//! Reactive form validation.
//!
//! Rules are attached per widget through a [`FormCoordinator`]. The
//! coordinator listens for value changes and focus loss, decides when an
//! error may become visible, and routes errors to an
//! [`ErrorDisplay`](crate::display::ErrorDisplay).
//!
//! # Example
//!
//! ```ignore
//! use fieldwarden::prelude::*;
//!
//! let form = FormCoordinator::new();
//! form.field(&username).required().min_length(3);
//! form.field(&email).required().email();
//! form.field(&confirm).required().matches(&password);
//!
//! form.on_validation_changed(move |valid| submit.set_enabled(valid));
//!
//! if form.validate_all().is_valid() {
//!     // Proceed with form submission
//! }
//! ```

mod field;
mod form;
mod result;
pub mod rule;
pub mod rules;

pub use field::Field;
pub use form::{FormCoordinator, ObserverId};
pub use result::{FieldError, ValidationResult};
pub use rule::{Message, Rule, RuleSet, Subject};
