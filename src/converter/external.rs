use super::{ConvertError, Converter};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

/// Converter backed by an external executable.
///
/// The file path is appended as the last argument and standard output is
/// taken as the converted text.
#[derive(Debug, Clone)]
pub struct ExternalConverter {
    name: String,
    program: PathBuf,
    args: Vec<OsString>,
}

impl ExternalConverter {
    pub fn new<I, S>(name: impl Into<String>, program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            name: name.into(),
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// `pandoc -t markdown`, if pandoc is on PATH
    pub fn pandoc() -> Option<Self> {
        let program = which::which("pandoc").ok()?;
        Some(Self::new("pandoc", program, ["-t", "markdown"]))
    }

    /// `<python> -m jupytext --to markdown --output -`, if the module is importable
    pub fn jupytext(python: &str) -> Option<Self> {
        let program = which::which(python).ok()?;
        let probe = Command::new(&program)
            .args(["-m", "jupytext", "--version"])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match probe {
            Ok(status) if status.success() => Some(Self::new(
                "jupytext",
                program,
                ["-m", "jupytext", "--to", "markdown", "--output", "-"],
            )),
            Ok(status) => {
                debug!(python = %python, %status, "jupytext not available");
                None
            }
            Err(e) => {
                debug!(python = %python, error = %e, "jupytext probe failed");
                None
            }
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }
}

impl Converter for ExternalConverter {
    fn name(&self) -> &str {
        &self.name
    }

    fn convert(&self, path: &Path) -> Result<String, ConvertError> {
        let program = self.program.display().to_string();

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ConvertError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ConvertError::Failed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| ConvertError::InvalidOutput { program })
    }
}
