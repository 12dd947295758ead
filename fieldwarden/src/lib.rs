//! Reactive form validation with overlay error feedback.
//!
//! `fieldwarden` attaches declarative rules to input widgets, tracks field
//! and form validity as the user types, and shows errors through pluggable
//! displays anchored to the widgets on screen. It talks to the host toolkit
//! through two capabilities only: value extraction ([`adapter`]) and the
//! render target ([`Widget`](widget::Widget) plus
//! [`OverlaySurface`](surface::OverlaySurface)). The [`headless`] module
//! implements both in memory.

pub mod adapter;
pub mod display;
pub mod error;
pub mod headless;
pub mod i18n;
pub mod surface;
pub mod validation;
pub mod widget;

pub use error::FormError;

pub mod prelude {
    pub use crate::adapter::{AdapterRegistry, ValueAdapter};
    pub use crate::display::{
        BlockConfig, BlockDisplay, CompositeDisplay, DisplayRef, ErrorDisplay, InlineLabelConfig,
        InlineLabelDisplay, MarkerConfig, OutlineDisplay, TooltipConfig, TooltipDisplay,
        TrailingMarkerDisplay,
    };
    pub use crate::error::FormError;
    pub use crate::i18n::Locale;
    pub use crate::validation::rules;
    pub use crate::validation::{
        Field, FieldError, FormCoordinator, Rule, Subject, ValidationResult,
    };
    pub use crate::widget::{AsWidget, Widget, WidgetId, WidgetRef};
}
