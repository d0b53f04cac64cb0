use miette::Diagnostic;
use std::{
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ModuleError {
    #[error("unable to run '{program}' in '{directory}'")]
    #[diagnostic(
        code(algo::module::spawn),
        help("Make sure Go is installed and on your PATH, or pass --skip-mod-init")
    )]
    Spawn {
        program: String,
        directory: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to initialize go.mod: '{program} mod init {module}' exited with {status}")]
    #[diagnostic(
        code(algo::module::failed),
        help("See the output above; the generated files were left in place")
    )]
    Failed {
        program: String,
        module: String,
        status: ExitStatus,
    },
}

/// Sets up the module manifest of a freshly generated project.
pub trait ModuleInitializer {
    fn init_module(&self, base_path: &Path, module: &str) -> Result<(), ModuleError>;
}

/// Runs `go mod init <module>` inside the project directory.
#[derive(Debug, Clone)]
pub struct GoModule {
    pub program: String,
}
impl Default for GoModule {
    fn default() -> Self {
        Self {
            program: "go".to_string(),
        }
    }
}
impl GoModule {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}
impl ModuleInitializer for GoModule {
    fn init_module(&self, base_path: &Path, module: &str) -> Result<(), ModuleError> {
        log::debug!(
            "running {} mod init {} in {}",
            self.program,
            module,
            base_path.display()
        );

        // stdout and stderr are inherited so the tool's own output reaches the user
        let status = Command::new(&self.program)
            .args(["mod", "init", module])
            .current_dir(base_path)
            .status()
            .map_err(|error| ModuleError::Spawn {
                program: self.program.clone(),
                directory: base_path.to_path_buf(),
                source: error,
            })?;

        if !status.success() {
            return Err(ModuleError::Failed {
                program: self.program.clone(),
                module: module.to_string(),
                status,
            });
        }

        Ok(())
    }
}
