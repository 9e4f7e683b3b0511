use std::time::Duration;

pub const DEVELOPMENT_BASE_URL: &str = "http://localhost:5001";
pub const PRODUCTION_BASE_URL: &str = "https://constellation-travel-backend.onrender.com";

pub const DEALS_PATH: &str = "/api/deals";
pub const ENHANCED_DEALS_PATH: &str = "/api/deals/enhanced";
pub const SEARCH_PATH: &str = "/api/search";
pub const FLIGHTS_SEARCH_PATH: &str = "/api/flights/search";
pub const HEALTH_PATH: &str = "/api/health";

/// Host suffixes that select the deployed backend.
const PRODUCTION_HOST_SUFFIXES: [&str; 2] = ["github.io", "onrender.com"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Development => DEVELOPMENT_BASE_URL,
            Self::Production => PRODUCTION_BASE_URL,
        }
    }

    pub fn default_timeout(self) -> Duration {
        match self {
            Self::Development => Duration::from_secs(10),
            Self::Production => Duration::from_secs(15),
        }
    }
}

fn normalize_host(hostname: &str) -> String {
    let host = hostname.trim().to_ascii_lowercase();
    let host = match host.rsplit_once(':') {
        Some((name, port)) if !port.is_empty() && port.chars().all(|c| c.is_ascii_digit()) => {
            name.to_string()
        }
        _ => host,
    };
    host.trim_end_matches('.').to_string()
}

/// Anything that is not one of the deployed hosts, including an empty or
/// unrecognized name, is treated as development.
pub fn resolve_environment(hostname: &str) -> Environment {
    let host = normalize_host(hostname);
    let is_production = PRODUCTION_HOST_SUFFIXES
        .iter()
        .any(|suffix| host == *suffix || host.ends_with(&format!(".{suffix}")));
    if is_production {
        Environment::Production
    } else {
        Environment::Development
    }
}

pub fn resolve_base_url(hostname: &str) -> &'static str {
    resolve_environment(hostname).base_url()
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub environment: Environment,
    pub base_url: String,
    pub timeout: Duration,
    pub proxy: Option<String>,
}

impl ApiConfig {
    pub fn for_host(hostname: &str) -> Self {
        let environment = resolve_environment(hostname);
        Self {
            environment,
            base_url: environment.base_url().to_string(),
            timeout: environment.default_timeout(),
            proxy: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::for_host("localhost")
    }
}
