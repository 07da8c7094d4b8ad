//! Step panels shown inside the main window

mod file_picker;
mod run;

pub use file_picker::FilePickerPanel;
pub use run::RunPanel;
