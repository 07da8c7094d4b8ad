//! Optimization Window - The single application window
//!
//! Fixed layout: title banner, Step 1 (pick the supercuts file), Step 2 (run
//! the optimizer) and a greeting line. The window owns `WindowState`; the
//! panels only render it and report clicks.

use crate::config::AppConfig;
use crate::error::LauncherError;
use crate::runner::{self, RunResult};
use crate::state::WindowState;
use crate::ui::app::OptimizationApplication;
use crate::ui::panels::{FilePickerPanel, RunPanel};
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

/// How often the main loop checks for a finished run
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Width of the "Step N" header column
const STEP_HEADER_WIDTH: i32 = 200;

mod imp {
    use super::*;

    #[derive(gtk::CompositeTemplate)]
    #[template(string = r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <interface>
            <template class="OptimizationWindow" parent="AdwApplicationWindow">
                <property name="title">Optimization</property>
                <property name="default-width">800</property>
                <property name="default-height">600</property>
                <style>
                    <class name="optimization-window"/>
                </style>
                <property name="content">
                    <object class="GtkBox" id="main_box">
                        <property name="orientation">vertical</property>

                        <!-- Title banner -->
                        <child>
                            <object class="GtkLabel" id="banner">
                                <property name="label">Optimization.. for the rest of us</property>
                                <property name="halign">center</property>
                                <property name="margin-top">12</property>
                                <property name="margin-bottom">12</property>
                                <style>
                                    <class name="title-1"/>
                                    <class name="banner"/>
                                </style>
                            </object>
                        </child>

                        <!-- Step rows are added in code -->
                        <child>
                            <object class="GtkBox" id="steps_box">
                                <property name="orientation">vertical</property>
                                <property name="vexpand">true</property>
                            </object>
                        </child>

                        <child>
                            <object class="GtkLabel" id="greeting">
                                <property name="label">Hello World</property>
                                <property name="halign">start</property>
                                <property name="margin-start">8</property>
                                <property name="margin-top">8</property>
                                <property name="margin-bottom">8</property>
                                <style>
                                    <class name="greeting"/>
                                </style>
                            </object>
                        </child>
                    </object>
                </property>
            </template>
        </interface>
    "#)]
    pub struct OptimizationWindow {
        #[template_child]
        pub steps_box: TemplateChild<gtk::Box>,

        pub config: RefCell<AppConfig>,
        pub state: RefCell<WindowState>,

        pub file_panel: RefCell<Option<FilePickerPanel>>,
        pub run_panel: RefCell<Option<RunPanel>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for OptimizationWindow {
        const NAME: &'static str = "OptimizationWindow";
        type Type = super::OptimizationWindow;
        type ParentType = adw::ApplicationWindow;

        fn class_init(klass: &mut Self::Class) {
            klass.bind_template();
        }

        fn instance_init(obj: &glib::subclass::InitializingObject<Self>) {
            obj.init_template();
        }
    }

    impl ObjectImpl for OptimizationWindow {}
    impl WidgetImpl for OptimizationWindow {}
    impl WindowImpl for OptimizationWindow {}
    impl ApplicationWindowImpl for OptimizationWindow {}
    impl AdwApplicationWindowImpl for OptimizationWindow {}

    impl Default for OptimizationWindow {
        fn default() -> Self {
            Self {
                steps_box: TemplateChild::default(),
                config: RefCell::new(AppConfig::default()),
                state: RefCell::new(WindowState::new()),
                file_panel: RefCell::new(None),
                run_panel: RefCell::new(None),
            }
        }
    }
}

glib::wrapper! {
    pub struct OptimizationWindow(ObjectSubclass<imp::OptimizationWindow>)
        @extends adw::ApplicationWindow, gtk::ApplicationWindow, gtk::Window, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Native, gtk::Root, gtk::ShortcutManager;
}

impl OptimizationWindow {
    pub fn new(app: &OptimizationApplication, config: AppConfig) -> Self {
        let window: Self = glib::Object::builder()
            .property("application", app)
            .build();

        *window.imp().config.borrow_mut() = config;

        // Panels are wired after config is in place
        window.setup_steps();
        window.render();

        window
    }

    fn setup_steps(&self) {
        let imp = self.imp();

        let file_panel = FilePickerPanel::new();
        file_panel.connect_local(
            "pick-clicked",
            false,
            glib::clone!(@weak self as window => @default-return None, move |_| {
                window.pick_file();
                None
            }),
        );

        let run_panel = RunPanel::new();
        run_panel.connect_local(
            "run-clicked",
            false,
            glib::clone!(@weak self as window => @default-return None, move |_| {
                window.run_optimizer();
                None
            }),
        );

        imp.steps_box
            .append(&step_row("Step 1", 40, "step-one-header", &file_panel));
        imp.steps_box
            .append(&step_row("Step 2", 400, "step-two-header", &run_panel));

        *imp.file_panel.borrow_mut() = Some(file_panel);
        *imp.run_panel.borrow_mut() = Some(run_panel);
    }

    /// Push `WindowState` into the labels
    fn render(&self) {
        let imp = self.imp();
        let state = imp.state.borrow();

        if let Some(ref panel) = *imp.file_panel.borrow() {
            panel.set_path(state.selected_file());
        }

        if let Some(ref panel) = *imp.run_panel.borrow() {
            panel.set_log(state.process_log());
            panel.set_running(state.is_running());
        }
    }

    /// Step 1: open a modal file dialog and store the chosen path
    fn pick_file(&self) {
        let dialog = gtk::FileDialog::builder()
            .title("Pick your supercuts file")
            .modal(true)
            .build();

        glib::spawn_future_local(glib::clone!(@weak self as window => async move {
            let choice = match dialog.open_future(Some(&window)).await {
                Ok(file) => file.path(),
                Err(e) => {
                    // Cancel and dismiss land here too
                    tracing::debug!("File dialog closed without a selection: {}", e);
                    None
                }
            };

            window.apply_file_choice(choice);
        }));
    }

    fn apply_file_choice(&self, choice: Option<PathBuf>) {
        let changed = self
            .imp()
            .state
            .borrow_mut()
            .apply_file_choice(choice.as_deref());

        if changed {
            tracing::info!("Selected file: {}", self.imp().state.borrow().selected_file());
            self.render();
        }
    }

    /// Step 2: run the optimizer off the main thread and show its stderr
    fn run_optimizer(&self) {
        let imp = self.imp();

        let command = {
            let config = imp.config.borrow();
            imp.state.borrow_mut().begin_run(&config.launcher)
        };

        let Some(command) = command else {
            return;
        };

        tracing::info!("Running {}", command.display());
        self.render();

        let receiver = runner::spawn_worker(command);

        glib::timeout_add_local(
            POLL_INTERVAL,
            glib::clone!(@weak self as window => @default-return glib::ControlFlow::Break, move || {
                match receiver.try_recv() {
                    Ok(result) => {
                        window.finish_run(result);
                        glib::ControlFlow::Break
                    }
                    Err(mpsc::TryRecvError::Empty) => glib::ControlFlow::Continue,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        window.finish_run(Err(LauncherError::WorkerLost));
                        glib::ControlFlow::Break
                    }
                }
            }),
        );
    }

    fn finish_run(&self, result: RunResult) {
        self.imp().state.borrow_mut().finish_run(result);
        self.render();
    }
}

/// A "Step N" header column next to its panel
fn step_row(title: &str, height: i32, header_class: &str, body: &impl IsA<gtk::Widget>) -> gtk::Box {
    let header_label = gtk::Label::builder()
        .label(title)
        .xalign(0.0)
        .yalign(0.0)
        .margin_start(8)
        .margin_top(4)
        .css_classes(["step-text"])
        .build();

    let header = gtk::Box::builder()
        .orientation(gtk::Orientation::Vertical)
        .width_request(STEP_HEADER_WIDTH)
        .height_request(height)
        .margin_start(50)
        .css_classes([header_class])
        .build();
    header.append(&header_label);

    let row = gtk::Box::builder()
        .orientation(gtk::Orientation::Horizontal)
        .build();
    row.append(&header);
    row.append(body);

    row
}
