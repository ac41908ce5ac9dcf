use crate::{
    domain::BoardId,
    error::{BoardError, Result},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Settings for connecting a board view to its source of record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Root of the REST API, e.g. `http://localhost:8017`
    pub api_base_url: String,
    /// Board opened by the view
    pub board_id: Option<BoardId>,
    pub request_timeout_secs: u64,
    /// Directory used by the file-backed source
    pub data_dir: PathBuf,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8017".to_string(),
            board_id: None,
            request_timeout_secs: 30,
            data_dir: PathBuf::from(Self::DEFAULT_DATA_DIR),
        }
    }
}

impl BoardConfig {
    pub const CONFIG_FILE: &'static str = "config.toml";
    const DEFAULT_DATA_DIR: &'static str = ".kanban";

    const ENV_API_URL: &'static str = "KANBAN_API_URL";
    const ENV_BOARD_ID: &'static str = "KANBAN_BOARD_ID";
    const ENV_TIMEOUT: &'static str = "KANBAN_REQUEST_TIMEOUT_SECS";
    const ENV_DATA_DIR: &'static str = "KANBAN_DATA_DIR";

    /// Parses a TOML document; missing keys keep their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the TOML file at `path`, falling back to defaults when absent,
    /// then applies environment overrides
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents = tokio::fs::read_to_string(path).await?;
            toml::from_str::<Self>(&contents)?
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `KANBAN_*` overrides looked up through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(Self::ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Some(id) = lookup(Self::ENV_BOARD_ID) {
            self.board_id = Some(BoardId::new(id));
        }
        if let Some(secs) = lookup(Self::ENV_TIMEOUT) {
            self.request_timeout_secs = secs.parse().map_err(|_| {
                BoardError::ConfigError(format!("{} must be a number, got '{}'", Self::ENV_TIMEOUT, secs))
            })?;
        }
        if let Some(dir) = lookup(Self::ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.trim().is_empty() {
            return Err(BoardError::ConfigError("api_base_url must not be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(BoardError::ConfigError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The configured board, required before a view can load
    pub fn require_board_id(&self) -> Result<&BoardId> {
        self.board_id
            .as_ref()
            .ok_or_else(|| BoardError::ConfigError("board_id is not set".to_string()))
    }

    #[cfg(feature = "http-source")]
    pub fn http_source(&self) -> Result<crate::source::HttpBoardSource> {
        crate::source::HttpBoardSource::with_timeout(&self.api_base_url, self.request_timeout())
    }

    #[cfg(feature = "file-source")]
    pub fn file_source(&self) -> crate::source::FileBoardSource {
        crate::source::FileBoardSource::new(&self.data_dir)
    }
}
