//! Signup Example
//!
//! Drives a three-field signup form against the headless backend and prints
//! what a user would see after each step:
//! - errors stay hidden while a field is pristine
//! - focus loss reveals them
//! - a submit attempt reveals everything and focuses the first invalid field
//! - editing the password re-checks the confirmation
//!
//! Debug logs go to `signup.log`.

use std::fs::File;
use std::rc::Rc;
use std::time::Duration;

use anchorage::Rect;
use fieldwarden::headless::{HeadlessSurface, ManualScheduler, TextInput};
use fieldwarden::i18n;
use fieldwarden::prelude::*;
use log::LevelFilter;
use simplelog::{Config, WriteLogger};

// ============================================================================
// Signup form
// ============================================================================

struct Signup {
    surface: Rc<HeadlessSurface>,
    scheduler: Rc<ManualScheduler>,
    email: Rc<TextInput>,
    password: Rc<TextInput>,
    confirm: Rc<TextInput>,
    form: FormCoordinator,
}

impl Signup {
    fn new() -> Result<Self, FormError> {
        let scheduler = ManualScheduler::new();
        let surface = HeadlessSurface::with_scheduler(Rect::new(0, 0, 80, 24), scheduler.clone());

        let email = TextInput::new();
        email.mount(&surface, Rect::new(10, 2, 30, 1));
        let password = TextInput::new();
        password.mount(&surface, Rect::new(10, 8, 30, 1));
        let confirm = TextInput::new();
        confirm.mount(&surface, Rect::new(10, 14, 30, 1));

        let form = FormCoordinator::with_display(TooltipDisplay::new(TooltipConfig {
            padding: anchorage::Edges::symmetric(0, 1),
            arrow: 1,
            shadow: false,
            max_text_width: 40,
            ..TooltipConfig::dark()
        }));
        form.field(&email).required().email();
        form.field(&password).required().length(8, 64)?;
        form.field(&confirm).required().matches(&password);

        form.on_validation_changed(|valid| {
            println!("  [form is now {}]", if valid { "valid" } else { "invalid" });
        });

        Ok(Self {
            surface,
            scheduler,
            email,
            password,
            confirm,
            form,
        })
    }

    fn print(&self, step: &str) {
        // Let fades finish before looking.
        self.scheduler.advance(Duration::from_millis(250));

        println!("{step}");
        let annotations = self.surface.annotations();
        if annotations.is_empty() {
            println!("  (no errors shown)");
        }
        for annotation in annotations {
            let field = if annotation.target == self.email.id() {
                "email"
            } else if annotation.target == self.password.id() {
                "password"
            } else {
                "confirm"
            };
            println!(
                "  {field:<8} {:?} at ({}, {}): {}",
                annotation.side,
                annotation.bounds.x,
                annotation.bounds.y,
                annotation.text()
            );
        }
    }
}

fn main() {
    // Initialize file logging
    if let Ok(log_file) = File::create("signup.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }

    let signup = match Signup::new() {
        Ok(signup) => signup,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    signup.email.set_text("ada@");
    signup.print("typing into a pristine email field");

    signup.email.blur();
    signup.print("email lost focus");

    let result = signup.form.validate_all();
    signup.print(&format!("submit attempt ({} errors)", result.errors().len()));
    println!(
        "  focus requests: email {}, password {}",
        signup.email.focus_requests(),
        signup.password.focus_requests()
    );

    signup.email.set_text("ada@example.com");
    signup.password.set_text("correct horse");
    signup.confirm.set_text("correct horse");
    signup.print("all fields filled");

    signup.password.set_text("battery staple");
    signup.print("password edited after confirmation");

    i18n::set_locale(Locale::THAI);
    signup.form.validate_all();
    signup.print("same form in Thai");

    signup.form.dispose();
    signup.print("disposed");
}
