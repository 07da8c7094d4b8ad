//! Step 1 Panel - Picks the supercuts file
//!
//! Holds the "Pick your supercuts file" button and the label showing the
//! chosen path. The panel only reports clicks; the window owns the path.

use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::RefCell;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct FilePickerPanel {
        pub path_label: RefCell<Option<gtk::Label>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for FilePickerPanel {
        const NAME: &'static str = "OptimizationFilePickerPanel";
        type Type = super::FilePickerPanel;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for FilePickerPanel {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_ui();
        }

        fn signals() -> &'static [glib::subclass::Signal] {
            use std::sync::OnceLock;
            static SIGNALS: OnceLock<Vec<glib::subclass::Signal>> = OnceLock::new();
            SIGNALS.get_or_init(|| {
                vec![glib::subclass::Signal::builder("pick-clicked").build()]
            })
        }
    }

    impl WidgetImpl for FilePickerPanel {}
    impl BoxImpl for FilePickerPanel {}
}

glib::wrapper! {
    pub struct FilePickerPanel(ObjectSubclass<imp::FilePickerPanel>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl FilePickerPanel {
    pub fn new() -> Self {
        let obj: Self = glib::Object::builder()
            .property("orientation", gtk::Orientation::Horizontal)
            .property("spacing", 12)
            .property("hexpand", true)
            .build();

        obj.add_css_class("step-one-body");
        obj
    }

    fn setup_ui(&self) {
        let pick_button = gtk::Button::builder()
            .label("Pick your supercuts file")
            .valign(gtk::Align::Center)
            .margin_start(8)
            .margin_top(4)
            .margin_bottom(4)
            .build();

        pick_button.connect_clicked(glib::clone!(
            @weak self as panel =>
            move |_| {
                panel.emit_by_name::<()>("pick-clicked", &[]);
            }
        ));

        let path_label = gtk::Label::builder()
            .label("")
            .xalign(0.0)
            .hexpand(true)
            .selectable(true)
            .ellipsize(gtk::pango::EllipsizeMode::Middle)
            .css_classes(["step-text"])
            .build();

        self.append(&pick_button);
        self.append(&path_label);

        *self.imp().path_label.borrow_mut() = Some(path_label);
    }

    pub fn set_path(&self, path: &str) {
        if let Some(ref label) = *self.imp().path_label.borrow() {
            label.set_label(path);
            label.set_tooltip_text(if path.is_empty() { None } else { Some(path) });
        }
    }
}

impl Default for FilePickerPanel {
    fn default() -> Self {
        Self::new()
    }
}
