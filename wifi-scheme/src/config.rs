use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::probe::command::{CommandStatusTool, DEFAULT_STATUS_COMMAND};
use crate::probe::ActivationProbe;
use crate::properties::PropertyStore;
use crate::reconcile::{PartialUpdatePolicy, StateReconciler};
use crate::scheme::{Scheme, SchemeCatalog};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/wifi-scheme/config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SchemeConfig {
    pub state_file: PathBuf,
    #[serde(default = "default_status_command")]
    pub status_command: String,
    #[serde(default)]
    pub status_args: Vec<String>,
    #[serde(default)]
    pub reject_partial_updates: bool,
    #[serde(default, rename = "scheme")]
    pub schemes: Vec<Scheme>,
}

fn default_status_command() -> String {
    DEFAULT_STATUS_COMMAND.to_string()
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from("/var/lib/wifi-scheme/runningconfig"),
            status_command: default_status_command(),
            status_args: Vec::new(),
            reject_partial_updates: false,
            schemes: Vec::new(),
        }
    }
}

impl SchemeConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                // Create default config if not found
                let config = Self::default();
                if let Ok(content) = toml::to_string_pretty(&config) {
                    let _ = fs::write(path, content);
                }
                debug!(path = %path.display(), "Using default configuration");
                Ok(config)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn catalog(&self) -> SchemeCatalog {
        SchemeCatalog::new(self.schemes.clone())
    }

    pub fn status_tool(&self) -> CommandStatusTool {
        CommandStatusTool::new(self.status_command.clone(), self.status_args.clone())
    }

    pub fn partial_policy(&self) -> PartialUpdatePolicy {
        if self.reject_partial_updates {
            PartialUpdatePolicy::Reject
        } else {
            PartialUpdatePolicy::Ignore
        }
    }

    /// Open the state file and wire up the command-backed reconciler.
    pub fn reconciler(&self) -> Result<StateReconciler<CommandStatusTool>> {
        let store = PropertyStore::open(&self.state_file)?;
        let probe = ActivationProbe::new(self.status_tool());
        Ok(StateReconciler::new(store, probe).with_partial_policy(self.partial_policy()))
    }
}
