use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::carousel::CarouselTuning;

/// Prefix for environment overrides, e.g. `PORTFOLIO_SERVER__PORT=8000`.
pub const ENV_PREFIX: &str = "PORTFOLIO";

/// Config file picked up from the working directory when none is given.
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the headless CMS
    #[arg(long, env = "CMS_API_URL")]
    pub cms_url: Option<String>,

    /// Bearer token for the CMS API
    #[arg(long, env = "CMS_API_KEY", hide_env_values = true)]
    pub cms_api_key: Option<String>,

    /// Base URL of the backend API (chatbot, email)
    #[arg(long, env = "BACKEND_API_URL")]
    pub backend_url: Option<String>,

    /// Enable rate limiting
    #[arg(long, env = "RATE_LIMIT_ENABLED")]
    pub rate_limit_enabled: Option<bool>,

    /// Disable timeout middleware
    #[arg(long, env = "TIMEOUT_DISABLED")]
    pub timeout_disabled: Option<bool>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cms: CmsConfig,
    pub backend: BackendConfig,
    pub chat: ChatConfig,
    pub site: SiteConfig,
    pub resilience: ResilienceConfig,
    /// Motion constants handed to every carousel on the page.
    #[serde(default)]
    pub carousel: CarouselTuning,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CmsConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub chat_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    /// First message shown in every new conversation.
    pub greeting: String,
    /// Idle time after which a visitor's conversation is dropped.
    pub session_ttl_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    /// Used when the CMS has no header title.
    pub title: String,
    pub static_dir: String,
    /// Markdown shown when a project's own document cannot be loaded.
    pub markdown_fallback: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResilienceConfig {
    pub rate_limit_enabled: bool,
    pub timeout_disabled: bool,
    pub requests_per_second: f32,
    pub burst_size: f32,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("cms.base_url", "http://localhost:1337")?
            .set_default("backend.base_url", "http://localhost:8000")?
            .set_default("backend.chat_timeout_secs", 15)?
            .set_default(
                "chat.greeting",
                "Hello! I'm the virtual assistant of this portfolio. Ask me about my projects, skills or experience.",
            )?
            .set_default("chat.session_ttl_secs", 30 * 60)?
            .set_default("site.title", "Portfolio")?
            .set_default("site.static_dir", "static")?
            .set_default("site.markdown_fallback", "static/markdown/fallback.md")?
            .set_default("resilience.rate_limit_enabled", true)?
            .set_default("resilience.timeout_disabled", false)?
            .set_default("resilience.requests_per_second", 5.0)?
            .set_default("resilience.burst_size", 10.0)?;

        // Explicit file must exist; ./config.yaml is optional.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            }
            None => builder,
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // Priority: CLI flag > CLI env var > PORTFOLIO_ env > config file > defaults.
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(url) = cli.cms_url {
            builder = builder.set_override("cms.base_url", url)?;
        }
        if let Some(key) = cli.cms_api_key {
            builder = builder.set_override("cms.api_key", key)?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("backend.base_url", url)?;
        }
        if let Some(rl) = cli.rate_limit_enabled {
            builder = builder.set_override("resilience.rate_limit_enabled", rl)?;
        }
        if let Some(td) = cli.timeout_disabled {
            builder = builder.set_override("resilience.timeout_disabled", td)?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }

    /// Socket address to bind, as `host:port`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
