//! Step 2 Panel - Runs the optimizer
//!
//! Shows the "Run optimization" button and the label holding the captured
//! standard error of the last run.

use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::RefCell;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct RunPanel {
        pub run_button: RefCell<Option<gtk::Button>>,
        pub spinner: RefCell<Option<gtk::Spinner>>,
        pub log_label: RefCell<Option<gtk::Label>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for RunPanel {
        const NAME: &'static str = "OptimizationRunPanel";
        type Type = super::RunPanel;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for RunPanel {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_ui();
        }

        fn signals() -> &'static [glib::subclass::Signal] {
            use std::sync::OnceLock;
            static SIGNALS: OnceLock<Vec<glib::subclass::Signal>> = OnceLock::new();
            SIGNALS.get_or_init(|| {
                vec![glib::subclass::Signal::builder("run-clicked").build()]
            })
        }
    }

    impl WidgetImpl for RunPanel {}
    impl BoxImpl for RunPanel {}
}

glib::wrapper! {
    pub struct RunPanel(ObjectSubclass<imp::RunPanel>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl RunPanel {
    pub fn new() -> Self {
        let obj: Self = glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("spacing", 8)
            .property("hexpand", true)
            .build();

        obj.add_css_class("step-two-body");
        obj
    }

    fn setup_ui(&self) {
        let imp = self.imp();

        let subtitle = gtk::Label::builder()
            .label("Foo")
            .xalign(0.0)
            .margin_start(8)
            .margin_top(4)
            .css_classes(["title-2", "step-text"])
            .build();

        let run_button = gtk::Button::builder()
            .label("Run optimization")
            .halign(gtk::Align::Start)
            .margin_start(8)
            .build();

        run_button.connect_clicked(glib::clone!(
            @weak self as panel =>
            move |_| {
                panel.emit_by_name::<()>("run-clicked", &[]);
            }
        ));

        let spinner = gtk::Spinner::builder()
            .spinning(false)
            .visible(false)
            .build();

        let button_row = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(8)
            .build();
        button_row.append(&run_button);
        button_row.append(&spinner);

        // stderr can be long; keep it scrollable inside the fixed-height row
        let log_label = gtk::Label::builder()
            .label("")
            .xalign(0.0)
            .yalign(0.0)
            .wrap(true)
            .wrap_mode(gtk::pango::WrapMode::WordChar)
            .selectable(true)
            .margin_start(8)
            .margin_end(8)
            .css_classes(["monospace", "step-text"])
            .build();

        let scroller = gtk::ScrolledWindow::builder()
            .hscrollbar_policy(gtk::PolicyType::Never)
            .vexpand(true)
            .child(&log_label)
            .build();

        self.append(&subtitle);
        self.append(&button_row);
        self.append(&scroller);

        *imp.run_button.borrow_mut() = Some(run_button);
        *imp.spinner.borrow_mut() = Some(spinner);
        *imp.log_label.borrow_mut() = Some(log_label);
    }

    pub fn set_log(&self, text: &str) {
        if let Some(ref label) = *self.imp().log_label.borrow() {
            label.set_label(text);
        }
    }

    /// Disable the button and show the spinner while a run is in flight
    pub fn set_running(&self, running: bool) {
        let imp = self.imp();

        if let Some(ref button) = *imp.run_button.borrow() {
            button.set_sensitive(!running);
        }

        if let Some(ref spinner) = *imp.spinner.borrow() {
            spinner.set_visible(running);
            spinner.set_spinning(running);
        }
    }
}

impl Default for RunPanel {
    fn default() -> Self {
        Self::new()
    }
}
