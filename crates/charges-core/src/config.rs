use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::Result;
use crate::heads::{Head, HeadTable};

pub const CONFIG_ENV: &str = "CHARGES_CONFIG";
pub const STORE_DIR_ENV: &str = "CHARGES_STORE_DIR";
pub const DEFAULT_STORE_DIR: &str = "charges-reports";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_dir: PathBuf,
    pub include_summaries: bool,
    pub heads: HeadTable,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    store_dir: Option<PathBuf>,
    #[serde(default)]
    include_summaries: bool,
    heads: Option<Vec<Head>>,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        Self::from_file(file)
    }

    fn from_file(file: ConfigFile) -> Result<Self> {
        let heads = match file.heads {
            Some(heads) => HeadTable::new(heads)?,
            None => HeadTable::bundled()?,
        };
        Ok(Self {
            store_dir: file
                .store_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_DIR)),
            include_summaries: file.include_summaries,
            heads,
        })
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Resolves configuration from `.env`, an optional TOML file and the
    /// environment. An explicit `path` wins over `CHARGES_CONFIG`; the
    /// `CHARGES_STORE_DIR` variable overrides whatever the file says.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let from_env = env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match path.map(Path::to_path_buf).or(from_env) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading config file");
                Self::load_file(&path)?
            }
            None => Self::from_file(ConfigFile::default())?,
        };

        if let Some(dir) = env::var_os(STORE_DIR_ENV) {
            config.store_dir = PathBuf::from(dir);
        }
        Ok(config)
    }
}
