//! Optimization Application - GTK4 Application Setup
//!
//! Initializes the GTK4/Libadwaita application and handles the main event loop.

use crate::config::AppConfig;
use crate::ui::window::OptimizationWindow;
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::gio;
use std::cell::RefCell;

/// Application ID for the optimization front-end
pub const APP_ID: &str = "org.optimize.Gui";

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct OptimizationApplication {
        pub config: RefCell<AppConfig>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for OptimizationApplication {
        const NAME: &'static str = "OptimizationApplication";
        type Type = super::OptimizationApplication;
        type ParentType = adw::Application;
    }

    impl ObjectImpl for OptimizationApplication {}

    impl ApplicationImpl for OptimizationApplication {
        fn activate(&self) {
            let app = self.obj();

            // Single window: re-activation just raises it
            if let Some(window) = app.active_window() {
                window.present();
                return;
            }

            let config = self.config.borrow().clone();
            let window = OptimizationWindow::new(&app, config);
            window.present();
        }

        fn startup(&self) {
            self.parent_startup();

            let css_provider = gtk::CssProvider::new();
            css_provider.load_from_data(include_str!("styles.css"));

            match gtk::gdk::Display::default() {
                Some(display) => {
                    gtk::style_context_add_provider_for_display(
                        &display,
                        &css_provider,
                        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
                    );
                }
                None => {
                    tracing::warn!("No display available. CSS styling will not be applied.");
                }
            }

            let app = self.obj();
            app.setup_actions();
        }
    }

    impl GtkApplicationImpl for OptimizationApplication {}
    impl AdwApplicationImpl for OptimizationApplication {}
}

glib::wrapper! {
    pub struct OptimizationApplication(ObjectSubclass<imp::OptimizationApplication>)
        @extends adw::Application, gtk::Application, gio::Application,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl OptimizationApplication {
    pub fn new(config: AppConfig) -> Self {
        let app: Self = glib::Object::builder()
            .property("application-id", APP_ID)
            .property("flags", gio::ApplicationFlags::FLAGS_NONE)
            .build();

        *app.imp().config.borrow_mut() = config;

        app
    }

    fn setup_actions(&self) {
        let quit_action = gio::SimpleAction::new("quit", None);
        quit_action.connect_activate(glib::clone!(
            @weak self as app =>
            move |_, _| {
                app.quit();
            }
        ));
        self.add_action(&quit_action);

        self.set_accels_for_action("app.quit", &["<Ctrl>q"]);
    }

    /// Run the GTK main loop.
    ///
    /// Our own CLI is parsed by clap, so GTK is handed no arguments.
    pub fn run(&self) -> glib::ExitCode {
        self.run_with_args::<&str>(&[])
    }
}

impl Default for OptimizationApplication {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
