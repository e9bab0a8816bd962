use std::path::PathBuf;

/// Context passed throughout the application containing global configuration
#[derive(Clone)]
pub struct Context {
    /// Enable verbose output (show packaging stages and archived entries)
    pub verbose: bool,

    /// Base directory (working directory or the directory containing sigma.toml)
    pub base_dir: PathBuf,

    /// Directory holding the runtime entries referenced by presets
    pub runtime_dir: PathBuf,
}

impl Context {
    pub fn new(base_dir: PathBuf, verbose: bool) -> Self {
        let runtime_dir = base_dir.join("runtime");

        Self {
            verbose,
            base_dir,
            runtime_dir,
        }
    }

    pub fn with_runtime_dir(mut self, runtime_dir: PathBuf) -> Self {
        self.runtime_dir = runtime_dir;
        self
    }
}

/// Directories produced by the external build once output is finalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// Deployment root; everything below it ends up in the archive
    pub root_dir: PathBuf,

    /// Location of the compiled server code
    pub server_dir: PathBuf,
}

impl BuildOutput {
    pub fn new(root_dir: impl Into<PathBuf>, server_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            server_dir: server_dir.into(),
        }
    }

    /// Output rooted at `root_dir` with server code in `<root_dir>/server`
    #[cfg(test)]
    pub fn with_default_server_dir(root_dir: &std::path::Path) -> Self {
        Self::new(root_dir, root_dir.join("server"))
    }
}
