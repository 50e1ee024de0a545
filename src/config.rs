use anyhow::Context;

/// Origins allowed to call the relay. The last entry is the deployed
/// frontend canister; the rest are local development hosts.
pub const ALLOWED_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:4943",
    "https://gc7jb-aiaaa-aaaaf-qap7a-cai.icp0.io",
];

/// Request bodies above this size are rejected before any handler runs.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub api_key: String,
    pub api_base: String,
}

impl Config {
    /// Reads the upstream credential (and optional base URL override) from
    /// the environment. Fails fast when the credential is missing rather than
    /// sending an empty bearer token on every request.
    pub fn from_env(port: u16) -> anyhow::Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .context("OPENAI_API_KEY is not set; the relay cannot authenticate upstream")?;
        let api_base =
            std::env::var("OPENAI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        Ok(Self {
            port,
            api_key,
            api_base,
        })
    }
}
