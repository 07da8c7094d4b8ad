//! The command line handed to the optimizer process.

use crate::config::LauncherConfig;
use std::ffi::OsString;
use std::path::PathBuf;

/// A fully resolved program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizeCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub working_dir: Option<PathBuf>,
}

impl OptimizeCommand {
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
        }
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Build the invocation for a launcher config.
    ///
    /// `selected_file` is only appended when `pass_selected_file` is set and
    /// the selection is non-empty.
    pub fn from_config(config: &LauncherConfig, selected_file: &str) -> Self {
        let mut args: Vec<OsString> = Vec::with_capacity(config.args.len() + 2);
        args.push(config.script.clone().into_os_string());
        args.extend(config.args.iter().map(OsString::from));

        if config.pass_selected_file && !selected_file.is_empty() {
            args.push(OsString::from(selected_file));
        }

        Self {
            program: OsString::from(&config.interpreter),
            args,
            working_dir: config.working_dir.clone(),
        }
    }

    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    /// Space-joined rendering for logs, e.g. `python ../optimize.py -h`
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
