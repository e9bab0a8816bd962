use crate::result::Result;
use crate::utils;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "sigma.toml";

pub const DEFAULT_PRESET: &str = "node-server";
pub const DEFAULT_OUTPUT_DIR: &str = ".output";

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct SigmaToml {
    #[serde(default)]
    pub deploy: DeployConfig,
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct DeployConfig {
    #[serde(default)]
    pub preset: Option<String>,

    #[serde(default)]
    pub output_dir: Option<String>,

    #[serde(default)]
    pub server_dir: Option<String>,

    #[serde(default)]
    pub runtime_dir: Option<String>,
}

/// Values supplied on the command line; these win over sigma.toml
#[derive(Debug, Default)]
pub struct Overrides {
    pub preset: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub server_dir: Option<PathBuf>,
    pub runtime_dir: Option<PathBuf>,
}

/// Fully resolved deployment settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_dir: PathBuf,
    pub preset: String,
    pub output_dir: PathBuf,
    pub server_dir: PathBuf,
    pub runtime_dir: PathBuf,
}

impl Config {
    /// Load sigma.toml (when present) and merge it with `overrides`
    pub fn load(config_path: Option<&Path>, base_dir: &Path, overrides: Overrides) -> Result<Self> {
        let (deploy, base_dir) = match config_path {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                let sigma_toml: SigmaToml = toml::from_str(&content)?;
                let base_dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| base_dir.to_path_buf());
                (sigma_toml.deploy, base_dir)
            }
            None => (DeployConfig::default(), base_dir.to_path_buf()),
        };

        Ok(Self::resolve(deploy, base_dir, overrides))
    }

    fn resolve(deploy: DeployConfig, base_dir: PathBuf, overrides: Overrides) -> Self {
        let preset = overrides
            .preset
            .or(deploy.preset)
            .unwrap_or_else(|| DEFAULT_PRESET.to_string());

        let output_dir = overrides
            .output_dir
            .or_else(|| deploy.output_dir.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let output_dir = utils::resolve(&base_dir, &output_dir);

        let server_dir = overrides
            .server_dir
            .or_else(|| deploy.server_dir.map(PathBuf::from))
            .map(|dir| utils::resolve(&base_dir, &dir))
            .unwrap_or_else(|| output_dir.join("server"));

        let runtime_dir = overrides
            .runtime_dir
            .or_else(|| deploy.runtime_dir.map(PathBuf::from))
            .map(|dir| utils::resolve(&base_dir, &dir))
            .unwrap_or_else(|| base_dir.join("runtime"));

        Self {
            base_dir,
            preset,
            output_dir,
            server_dir,
            runtime_dir,
        }
    }
}
