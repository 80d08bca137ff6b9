use std::process::{Command, Output, Stdio};

use crate::errors::UploadError;

/// Builder for constructing and executing external processes.
///
/// Provides a fluent API for setting program, arguments and stderr handling.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    discard_stderr: bool,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            discard_stderr: false,
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Send the child's standard error to the null device instead of capturing it.
    pub fn discard_stderr(mut self) -> Self {
        self.discard_stderr = true;
        self
    }

    /// The program and arguments as a single display string.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Execute the command and return its output.
    pub fn exec(&self) -> Result<Output, UploadError> {
        tracing::trace!("exec: {}", self.display());
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if self.discard_stderr {
            cmd.stderr(Stdio::null());
        }
        cmd.output().map_err(UploadError::from)
    }
}
