//! Configuration loaded from the environment.

use std::env;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// JSON file seeding the in-memory repository
    pub fixtures_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables, reading `.env` first.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            addr: lookup("ADDR").unwrap_or_else(|| String::from("127.0.0.1")),
            port: lookup("PORT").unwrap_or_else(|| String::from("3000")),
            fixtures_path: lookup("FIXTURES_PATH")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            log_format: lookup("LOG_FORMAT")
                .map(|raw| LogFormat::parse(&raw))
                .unwrap_or_default(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}
