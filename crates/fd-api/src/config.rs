use serde::Deserialize;

/// Deployment environment, selected with `ENV`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    #[serde(alias = "dev")]
    Development,
    #[serde(alias = "prod")]
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Process configuration, read once at startup.
///
/// Every field maps to the upper-cased environment variable of the same name
/// (`store_id` -> `STORE_ID`).
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    /// Identifier of the store instance all reads and writes go to
    pub store_id: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// PostgreSQL backend when set, in-memory store otherwise
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,
    #[serde(default)]
    pub env: Environment,
    /// Comma separated list of allowed CORS origins
    #[serde(default)]
    pub allowed_origins: Option<String>,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Build the config from explicit key/value pairs instead of the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `None` when no origins are configured (permissive CORS).
    pub fn parsed_allowed_origins(&self) -> Option<Vec<String>> {
        let origins = self.allowed_origins.as_deref()?;
        Some(
            origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        )
    }
}
