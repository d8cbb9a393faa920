use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::File,
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;
use workbench_client::{
    Config as ClientConfig, DataSetId, NamespaceId, ProjectId, Token, DEFAULT_ENDPOINT,
};

pub const CONFIG_PATH_ENV_VARIABLE_NAME: &str = "WORKBENCH_SUITE_CONFIG";
pub const ENDPOINT_ENV_VARIABLE_NAME: &str = "WORKBENCH_ENDPOINT";
pub const TOKEN_ENV_VARIABLE_NAME: &str = "WORKBENCH_TOKEN";
pub const PROJECT_ID_ENV_VARIABLE_NAME: &str = "WORKBENCH_PROJECT_ID";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SETTLE_MILLIS: u64 = 200;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SuiteConfig {
    pub endpoint: Url,
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub accept_invalid_certificates: bool,
    pub proxy: Option<Url>,
    /// Pause after writes the backend applies asynchronously.
    pub settle_millis: u64,
    pub seeded: SeededFixtures,
}

/// Ids provisioned out of band in the staging environment.
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct SeededFixtures {
    pub namespace_id: Option<NamespaceId>,
    pub project_id: Option<ProjectId>,
    pub data_set_id: Option<DataSetId>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        SuiteConfig {
            endpoint: DEFAULT_ENDPOINT.clone(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            accept_invalid_certificates: false,
            proxy: None,
            settle_millis: DEFAULT_SETTLE_MILLIS,
            seeded: SeededFixtures::default(),
        }
    }
}

impl SuiteConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            endpoint: self.endpoint.clone(),
            token: self.token.clone().map(Token),
            timeout: Duration::from_secs(self.timeout_secs),
            accept_invalid_certificates: self.accept_invalid_certificates,
            proxy: self.proxy.clone(),
            default_headers: Vec::new(),
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_millis)
    }

    /// Apply `WORKBENCH_*` overrides on top of whatever the file said.
    pub fn apply_env_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        if let Some(endpoint) = lookup(ENDPOINT_ENV_VARIABLE_NAME) {
            self.endpoint = Url::parse(&endpoint).with_context(|| {
                format!("{ENDPOINT_ENV_VARIABLE_NAME} is not a valid URL: `{endpoint}`")
            })?;
        }
        if let Some(token) = lookup(TOKEN_ENV_VARIABLE_NAME) {
            self.token = Some(token);
        }
        if let Some(project_id) = lookup(PROJECT_ID_ENV_VARIABLE_NAME) {
            self.seeded.project_id = Some(ProjectId(project_id));
        }
        Ok(self)
    }

    /// Copy safe to print: the token is masked.
    pub fn redacted(&self) -> Self {
        Self {
            token: self.token.as_ref().map(|_| "<redacted>".to_owned()),
            ..self.clone()
        }
    }
}

/// Resolve the config file location: env variable, then explicit path, then
/// the per-user config directory.
pub fn find_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV_VARIABLE_NAME) {
        return Some(PathBuf::from(path));
    }
    explicit.map(Path::to_path_buf).or_else(|| {
        dirs::config_dir().map(|dir| dir.join("workbench-suite").join("config.json"))
    })
}

pub fn read_suite_config(path: impl AsRef<Path>) -> Result<SuiteConfig> {
    debug!("Reading config file at `{}`", path.as_ref().display());
    if path.as_ref().exists() {
        let file = File::open(&path)
            .with_context(|| format!("Could not open config file `{}`", path.as_ref().display()))?;
        let config_reader = BufReader::new(file);
        serde_json::from_reader(config_reader)
            .with_context(|| format!("Could not parse config file `{}`", path.as_ref().display()))
    } else {
        Ok(Default::default())
    }
}

pub fn write_suite_config(path: impl AsRef<Path>, config: &SuiteConfig) -> Result<()> {
    debug!("Writing config file at `{}`", path.as_ref().display());
    let file = File::create(&path)
        .with_context(|| format!("Could not create config file `{}`", path.as_ref().display()))?;
    let config_writer = BufWriter::new(file);
    serde_json::to_writer_pretty(config_writer, &config).with_context(|| {
        format!(
            "Could not serialise configuration to `{}`",
            path.as_ref().display()
        )
    })
}

/// A file the user named but which isn't there means every setting falls back
/// to its default, so say so. Returns whether a warning was logged.
fn warn_if_missing(path: &Path, named: bool) -> bool {
    let missing = named && !path.exists();
    if missing {
        warn!("Configuration file `{}` doesn't exist.", path.display());
    }
    missing
}

/// Load the effective configuration for this process.
pub fn load(explicit: Option<&Path>) -> Result<SuiteConfig> {
    let named = explicit.is_some() || env::var_os(CONFIG_PATH_ENV_VARIABLE_NAME).is_some();
    let config = match find_config_path(explicit) {
        Some(path) => {
            warn_if_missing(&path, named);
            read_suite_config(path)?
        }
        None => SuiteConfig::default(),
    };
    config.apply_env_overrides(|name| env::var(name).ok())
}
