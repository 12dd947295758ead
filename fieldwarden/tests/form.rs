use std::cell::RefCell;
use std::rc::Rc;

use anchorage::Rect;
use fieldwarden::display::{ErrorDisplay, OutlineDisplay, TooltipConfig, TooltipDisplay};
use fieldwarden::headless::{HeadlessSurface, Tagged, TextInput};
use fieldwarden::validation::FormCoordinator;
use fieldwarden::widget::{Outline, Widget};

fn viewport() -> Rect {
    Rect::new(0, 0, 400, 300)
}

fn mounted(surface: &Rc<HeadlessSurface>, y: i32) -> Rc<TextInput> {
    let input = TextInput::new();
    input.mount(surface, Rect::new(10, y, 120, 20));
    input
}

fn record(form: &FormCoordinator) -> Rc<RefCell<Vec<bool>>> {
    let calls = Rc::new(RefCell::new(Vec::new()));
    form.on_validation_changed({
        let calls = calls.clone();
        move |valid| calls.borrow_mut().push(valid)
    });
    calls
}

// =============================================================================
// Gating
// =============================================================================

#[test]
fn test_pristine_field_hides_new_errors() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required().min_length(3);

    name.set_text("ab");

    assert!(form.erroneous_fields().is_empty());
    assert_eq!(surface.annotation_count(), 0);
    // The rule still fails; it is only not shown.
    assert_eq!(form.field_error(&name), Some("Must be at least 3 characters.".to_string()));
    assert!(!form.is_valid());
}

#[test]
fn test_focus_loss_reveals_error() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required().min_length(3);

    name.set_text("ab");
    name.blur();

    assert_eq!(form.erroneous_fields(), vec![name.id()]);
    let annotation = surface.annotation_for(name.id()).unwrap();
    assert_eq!(annotation.text(), "Must be at least 3 characters.");
    assert_eq!(name.outline(), Some(Outline::Error));

    name.set_text("abc");
    assert!(form.erroneous_fields().is_empty());
    assert_eq!(surface.annotation_count(), 0);
    assert_eq!(name.outline(), None);
}

#[test]
fn test_touched_field_updates_message_while_typing() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required().min_length(3);

    name.blur();
    assert_eq!(form.visible_error(&name), Some("This field is required.".to_string()));

    name.set_text("ab");
    assert_eq!(form.visible_error(&name), Some("Must be at least 3 characters.".to_string()));
    assert_eq!(surface.annotation_count(), 1);
    assert_eq!(surface.added_count(), 1);

    name.set_text("abc");
    assert_eq!(form.visible_error(&name), None);
}

#[test]
fn test_pristine_change_may_clear_but_not_show() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required();

    form.set_show_while_typing(true);
    name.set_text("");
    name.set_text("x");
    name.set_text("");
    assert_eq!(form.erroneous_fields(), vec![name.id()]);

    form.set_show_while_typing(false);
    name.set_text("fixed");
    assert!(form.erroneous_fields().is_empty());

    name.set_text("");
    assert!(form.erroneous_fields().is_empty());
    assert_eq!(surface.annotation_count(), 0);
}

#[test]
fn test_show_while_typing_reveals_immediately() {
    let surface = HeadlessSurface::new(viewport());
    let code = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.set_show_while_typing(true);
    assert!(form.show_while_typing());
    form.field(&code).digits(4);

    code.set_text("12");
    assert_eq!(form.visible_error(&code), Some("Must be exactly 4 digits.".to_string()));
    assert_eq!(surface.annotation_count(), 1);
}

#[test]
fn test_validate_field_respects_gating() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required();

    form.validate_field(&name);
    assert!(form.erroneous_fields().is_empty());

    name.blur();
    name.set_text("x");
    name.set_text("");
    form.validate_field(&name);
    assert_eq!(form.erroneous_fields(), vec![name.id()]);
}

// =============================================================================
// validate_all
// =============================================================================

#[test]
fn test_validate_all_reports_every_invalid_field() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let email = mounted(&surface, 60);
    let age = mounted(&surface, 110);
    let form = FormCoordinator::new();
    form.field(&name).required();
    form.field(&email).required().email();
    form.field(&age).number();

    email.set_text("nope");
    age.set_text("42");

    let result = form.validate_all();
    assert!(result.is_invalid());
    assert_eq!(result.errors().len(), 2);
    assert_eq!(result.first_invalid_widget(), Some(name.id()));
    assert_eq!(
        result.error_for(email.id()),
        Some("Please enter a valid email address.")
    );
    assert!(result.error_for(age.id()).is_none());

    assert_eq!(form.erroneous_fields(), vec![name.id(), email.id()]);
    assert_eq!(surface.annotation_count(), 2);
    assert!(form.is_validated());
}

#[test]
fn test_validate_all_focuses_first_invalid_field() {
    let surface = HeadlessSurface::new(viewport());
    let first = mounted(&surface, 10);
    let second = mounted(&surface, 60);
    let form = FormCoordinator::new();
    form.field(&first).required();
    form.field(&second).required();

    form.validate_all();

    assert_eq!(first.focus_requests(), 1);
    assert_eq!(first.scroll_requests(), 1);
    assert_eq!(second.focus_requests(), 0);
    assert_eq!(second.scroll_requests(), 0);
}

#[test]
fn test_validate_all_valid_form() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    name.set_text("Ada");
    let form = FormCoordinator::new();
    form.field(&name).required().min_length(3);

    let result = form.validate_all();
    assert!(result.is_valid());
    assert!(result.first_error().is_none());
    assert_eq!(name.focus_requests(), 0);
    assert_eq!(surface.annotation_count(), 0);
}

#[test]
fn test_validate_all_reveals_changes_afterwards() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required().min_length(3);

    name.set_text("abc");
    form.validate_all();
    assert!(form.erroneous_fields().is_empty());

    // After a submit attempt, typing reveals errors without a blur.
    name.set_text("ab");
    assert_eq!(form.erroneous_fields(), vec![name.id()]);
}

#[test]
fn test_required_then_min_length_round_trip() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required().min_length(3);

    let cases = [
        ("", Some("This field is required.")),
        ("ab", Some("Must be at least 3 characters.")),
        ("abc", None),
    ];
    for (text, expected) in cases {
        name.set_text(text);
        form.validate_all();
        assert_eq!(form.visible_error(&name).as_deref(), expected, "text {text:?}");
    }
}

#[test]
fn test_values_are_trimmed_before_rules_run() {
    let name = TextInput::with_text("   ");
    let form = FormCoordinator::new();
    form.field(&name).required();

    assert_eq!(form.field_error(&name), Some("This field is required.".to_string()));
    name.set_text("  ab  ");
    assert!(form.is_field_valid(&name));
}

#[test]
fn test_queries_do_not_touch_displays() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required();

    assert!(!form.is_valid());
    assert!(!form.is_field_valid(&name));
    assert_eq!(surface.annotation_count(), 0);
    assert!(form.erroneous_fields().is_empty());
}

// =============================================================================
// Observers
// =============================================================================

#[test]
fn test_validate_all_notifies_once() {
    let surface = HeadlessSurface::new(viewport());
    let first = mounted(&surface, 10);
    let second = mounted(&surface, 60);
    let form = FormCoordinator::new();
    form.field(&first).required();
    form.field(&second).required();
    let calls = record(&form);

    form.validate_all();
    assert_eq!(*calls.borrow(), vec![false]);

    form.validate_all();
    assert_eq!(*calls.borrow(), vec![false, false]);
}

#[test]
fn test_notifies_only_on_membership_change() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required().min_length(3);
    let calls = record(&form);

    name.blur();
    assert_eq!(*calls.borrow(), vec![false]);

    // Message changes, membership does not.
    name.set_text("ab");
    assert_eq!(*calls.borrow(), vec![false]);

    name.set_text("abc");
    assert_eq!(*calls.borrow(), vec![false, true]);

    name.set_text("abcd");
    assert_eq!(*calls.borrow(), vec![false, true]);
}

#[test]
fn test_form_validity_counts_other_erroneous_fields() {
    let surface = HeadlessSurface::new(viewport());
    let first = mounted(&surface, 10);
    let second = mounted(&surface, 60);
    let form = FormCoordinator::new();
    form.field(&first).required();
    form.field(&second).required();
    form.validate_all();
    let calls = record(&form);

    first.set_text("ok");
    assert_eq!(*calls.borrow(), vec![false]);
    second.set_text("ok");
    assert_eq!(*calls.borrow(), vec![false, true]);
}

#[test]
fn test_break_two_then_fix_two() {
    let surface = HeadlessSurface::new(viewport());
    let first = mounted(&surface, 10);
    let second = mounted(&surface, 60);
    first.set_text("ok");
    second.set_text("ok");
    let form = FormCoordinator::new();
    form.field(&first).required();
    form.field(&second).required();
    first.blur();
    second.blur();
    let calls = record(&form);

    first.set_text("");
    second.set_text("");
    assert_eq!(*calls.borrow(), vec![false, false]);

    first.set_text("ok");
    second.set_text("ok");
    let trues = calls.borrow().iter().filter(|valid| **valid).count();
    assert_eq!(trues, 1);
    assert_eq!(calls.borrow().last(), Some(&true));
}

#[test]
fn test_panicking_observer_does_not_stop_others() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required();

    form.on_validation_changed(|_| panic!("observer failed"));
    let calls = record(&form);

    let result = form.validate_all();
    assert!(result.is_invalid());
    assert_eq!(*calls.borrow(), vec![false]);
}

#[test]
fn test_remove_observer() {
    let form = FormCoordinator::new();
    let calls = Rc::new(RefCell::new(0));
    let id = form.on_validation_changed({
        let calls = calls.clone();
        move |_| *calls.borrow_mut() += 1
    });

    form.validate_all();
    assert!(form.remove_observer(id));
    assert!(!form.remove_observer(id));
    form.validate_all();
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn test_observer_may_query_form() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required();

    let seen = Rc::new(RefCell::new(Vec::new()));
    form.on_validation_changed({
        let form = form.clone();
        let seen = seen.clone();
        move |_| seen.borrow_mut().push(form.erroneous_fields().len())
    });

    form.validate_all();
    name.set_text("ok");
    assert_eq!(*seen.borrow(), vec![1, 0]);
}

// =============================================================================
// Registration and removal
// =============================================================================

#[test]
fn test_reregistration_reuses_field() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();

    form.field(&name).required();
    let field = form.field(&name).min_length(3);

    assert_eq!(form.field_count(), 1);
    assert_eq!(field.rule_count(), 2);
    assert_eq!(name.change_listener_count(), 1);
    assert_eq!(name.event_listener_count(), 1);
}

#[test]
fn test_two_forms_listen_independently() {
    let name = TextInput::new();
    let first = FormCoordinator::new();
    let second = FormCoordinator::new();

    first.field(&name).required();
    second.field(&name).required();
    assert_eq!(name.change_listener_count(), 2);

    first.dispose();
    assert_eq!(name.change_listener_count(), 1);
}

#[test]
fn test_remove_field_releases_everything() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required();
    form.validate_all();
    let calls = record(&form);

    assert!(form.remove_field(&name));

    assert!(!form.has_field(&name));
    assert_eq!(form.field_count(), 0);
    assert_eq!(surface.annotation_count(), 0);
    assert_eq!(name.outline(), None);
    assert_eq!(name.change_listener_count(), 0);
    assert_eq!(name.event_listener_count(), 0);
    assert_eq!(*calls.borrow(), vec![true]);

    // Later changes are ignored.
    name.set_text("x");
    name.set_text("");
    name.blur();
    assert_eq!(*calls.borrow(), vec![true]);
    assert!(!form.remove_field(&name));
    assert!(form.validate_all().is_valid());
}

#[test]
fn test_remove_valid_field_does_not_notify() {
    let name = TextInput::with_text("ok");
    let form = FormCoordinator::new();
    form.field(&name).required();
    let calls = record(&form);

    assert!(form.remove_field(&name));
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_dropped_widget_leaves_the_form() {
    let form = FormCoordinator::new();
    {
        let gone = TextInput::new();
        form.field(&gone).required();
    }

    assert_eq!(form.field_count(), 0);
    assert!(form.validate_all().is_valid());
    assert!(form.is_valid());
}

#[test]
fn test_dropped_widget_with_visible_error_is_cleared() {
    let surface = HeadlessSurface::new(viewport());
    let gone = mounted(&surface, 10);
    let keep = mounted(&surface, 60);
    keep.set_text("ok");
    let form = FormCoordinator::new();
    form.field(&gone).required();
    form.field(&keep).required();
    form.validate_all();
    assert_eq!(form.erroneous_fields(), vec![gone.id()]);
    assert_eq!(surface.annotation_count(), 1);

    drop(gone);
    assert!(form.erroneous_fields().is_empty());

    let calls = record(&form);
    assert!(form.validate_all().is_valid());
    assert!(form.erroneous_fields().is_empty());
    assert_eq!(surface.annotation_count(), 0);
    assert_eq!(form.field_count(), 1);

    keep.set_text("");
    keep.set_text("ok");
    assert_eq!(*calls.borrow(), vec![true, false, true]);
}

#[test]
fn test_dropped_erroneous_widget_notifies_on_next_change() {
    let surface = HeadlessSurface::new(viewport());
    let gone = mounted(&surface, 10);
    let keep = mounted(&surface, 60);
    let form = FormCoordinator::new();
    form.field(&gone).required();
    form.field(&keep).required();
    form.validate_all();
    let calls = record(&form);

    drop(gone);
    keep.set_text("ok");

    assert_eq!(*calls.borrow(), vec![true]);
    assert_eq!(surface.annotation_count(), 0);
}

// =============================================================================
// Deferred registration
// =============================================================================

#[test]
fn test_field_without_rules_is_not_registered() {
    let name = TextInput::new();
    let form = FormCoordinator::new();

    let field = form.field(&name).display(OutlineDisplay::default());

    assert!(!form.has_field(&name));
    assert_eq!(form.field_count(), 0);
    assert_eq!(name.change_listener_count(), 0);
    assert_eq!(name.event_listener_count(), 0);

    let field = field.required();
    assert!(form.has_field(&name));
    assert_eq!(field.rule_count(), 1);
    assert_eq!(name.change_listener_count(), 1);
    assert_eq!(name.event_listener_count(), 1);
}

#[test]
fn test_display_set_before_first_rule_is_kept() {
    let name = TextInput::new();
    let form = FormCoordinator::new();

    form.field(&name).display(OutlineDisplay::default()).required();
    form.validate_all();

    assert_eq!(name.outline(), Some(Outline::Error));
}

#[test]
fn test_detached_handles_merge_into_one_field() {
    let name = TextInput::with_text("ab");
    let form = FormCoordinator::new();

    let first = form.field(&name);
    let second = form.field(&name);
    second.min_length(3);
    let first = first.required();

    assert_eq!(form.field_count(), 1);
    assert_eq!(first.rule_count(), 2);
    assert_eq!(name.change_listener_count(), 1);
    // Rules keep the order they were attached in.
    assert_eq!(form.field_error(&name), Some("Must be at least 3 characters.".to_string()));
}

// =============================================================================
// Real-time toggle
// =============================================================================

#[test]
fn test_real_time_is_on_by_default() {
    let form = FormCoordinator::new();
    assert!(form.real_time());
}

#[test]
fn test_real_time_off_ignores_events_until_validated() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.set_real_time(false);
    form.set_show_while_typing(true);
    form.field(&name).required().min_length(3);
    let calls = record(&form);

    name.set_text("ab");
    name.blur();
    assert!(form.erroneous_fields().is_empty());
    assert_eq!(surface.annotation_count(), 0);
    assert!(calls.borrow().is_empty());

    assert!(!form.validate_all().is_valid());
    name.set_text("abc");
    assert!(form.erroneous_fields().is_empty());
    assert_eq!(*calls.borrow(), vec![false, true]);
}

#[test]
fn test_real_time_off_still_validates_explicit_field() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.set_real_time(false);
    form.field(&name).required();

    name.blur();
    assert!(form.erroneous_fields().is_empty());

    form.validate_field(&name);
    assert_eq!(form.erroneous_fields(), vec![name.id()]);
}

#[test]
fn test_add_validator() {
    let tagged = Tagged::new();
    tagged.set_client_value(Some("nope"));
    let form = FormCoordinator::new();

    form.add_validator(&tagged, |subject| {
        (subject.value() != "ok").then(|| "Must be ok.".to_string())
    });

    assert_eq!(form.field_error(&tagged), Some("Must be ok.".to_string()));
    tagged.set_client_value(Some(" ok "));
    assert!(form.is_field_valid(&tagged));
}

#[test]
fn test_conditional_rule_through_field_api() {
    let company = TextInput::new();
    let employed = Rc::new(RefCell::new(false));
    let form = FormCoordinator::new();
    form.field(&company).required_when({
        let employed = employed.clone();
        move || *employed.borrow()
    });

    assert!(form.is_valid());
    *employed.borrow_mut() = true;
    assert!(!form.is_valid());
}

// =============================================================================
// Displays
// =============================================================================

#[test]
fn test_per_field_display_override() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let email = mounted(&surface, 60);
    let form = FormCoordinator::new();
    form.field(&name).required().display(OutlineDisplay::default());
    form.field(&email).required();

    form.validate_all();

    assert!(surface.annotation_for(name.id()).is_none());
    assert_eq!(name.outline(), Some(Outline::Error));
    assert_eq!(name.hint(), Some("This field is required.".to_string()));
    assert!(surface.annotation_for(email.id()).is_some());
}

#[test]
fn test_set_error_display_moves_visible_errors() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required();
    form.validate_all();
    assert_eq!(surface.annotation_count(), 1);

    form.set_error_display(OutlineDisplay::new(Outline::Warning));

    assert_eq!(surface.annotation_count(), 0);
    assert_eq!(name.outline(), Some(Outline::Warning));
    assert_eq!(name.hint(), Some("This field is required.".to_string()));
    assert!(form.error_display().is_showing(name.id()));

    name.set_text("ok");
    assert_eq!(name.outline(), None);
    assert_eq!(name.hint(), None);
}

#[test]
fn test_set_error_display_leaves_overrides_alone() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let override_display = Rc::new(OutlineDisplay::default());
    let form = FormCoordinator::new();
    form.field(&name).required().display(Rc::clone(&override_display));
    form.validate_all();

    form.set_error_display(TooltipDisplay::new(TooltipConfig::danger()));

    assert!(override_display.is_showing(name.id()));
    assert_eq!(surface.annotation_count(), 0);
}

#[test]
fn test_with_display_uses_given_default() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::with_display(OutlineDisplay::default());
    form.field(&name).required();

    form.validate_all();
    assert_eq!(surface.annotation_count(), 0);
    assert_eq!(name.outline(), Some(Outline::Error));
}

// =============================================================================
// Clearing and disposal
// =============================================================================

#[test]
fn test_clear_validation_returns_fields_to_pristine() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required();
    form.validate_all();
    let calls = record(&form);

    form.clear_validation();

    assert_eq!(*calls.borrow(), vec![true]);
    assert!(form.erroneous_fields().is_empty());
    assert!(!form.is_validated());
    assert_eq!(surface.annotation_count(), 0);
    assert_eq!(name.outline(), None);

    name.set_text("x");
    name.set_text("");
    assert!(form.erroneous_fields().is_empty());
    assert_eq!(form.field_count(), 1);
}

#[test]
fn test_dispose_releases_everything() {
    let surface = HeadlessSurface::new(viewport());
    let name = mounted(&surface, 10);
    let form = FormCoordinator::new();
    form.field(&name).required();
    form.validate_all();
    let calls = record(&form);

    form.dispose();

    assert_eq!(*calls.borrow(), vec![true]);
    assert_eq!(form.field_count(), 0);
    assert_eq!(surface.annotation_count(), 0);
    assert_eq!(surface.resize_listener_count(), 0);
    assert_eq!(name.change_listener_count(), 0);
    assert_eq!(name.event_listener_count(), 0);

    name.set_text("x");
    form.validate_all();
    assert_eq!(*calls.borrow(), vec![true]);
}

#[test]
fn test_dropping_form_releases_listeners() {
    let name = TextInput::new();
    {
        let form = FormCoordinator::new();
        form.field(&name).required();
        assert_eq!(name.change_listener_count(), 1);
    }
    assert_eq!(name.change_listener_count(), 0);
    assert_eq!(name.event_listener_count(), 0);
    name.set_text("x");
    name.blur();
}
