use std::time::Duration;

use constellation::config::{
    self, resolve_base_url, resolve_environment, ApiConfig, Environment, DEVELOPMENT_BASE_URL,
    PRODUCTION_BASE_URL,
};

#[test]
fn production_hosts() {
    for host in [
        "github.io",
        "someone.github.io",
        "constellation-travel-backend.onrender.com",
        "ONRENDER.COM",
        "someone.github.io.",
        "someone.github.io:443",
    ] {
        assert_eq!(resolve_environment(host), Environment::Production, "{host}");
        assert_eq!(resolve_base_url(host), PRODUCTION_BASE_URL, "{host}");
    }
}

#[test]
fn development_hosts() {
    for host in [
        "",
        "localhost",
        "127.0.0.1",
        "localhost:5173",
        "example.com",
        "github.io.evil.com",
        "notgithub.io",
        "onrender.com.example",
    ] {
        assert_eq!(resolve_environment(host), Environment::Development, "{host}");
        assert_eq!(resolve_base_url(host), DEVELOPMENT_BASE_URL, "{host}");
    }
}

#[test]
fn resolution_is_stable() {
    for host in ["someone.github.io", "localhost", "whatever"] {
        assert_eq!(resolve_base_url(host), resolve_base_url(host));
    }
}

#[test]
fn config_for_host_uses_environment_defaults() {
    let dev = ApiConfig::for_host("localhost");
    assert_eq!(dev.base_url, DEVELOPMENT_BASE_URL);
    assert_eq!(dev.timeout, Duration::from_secs(10));

    let prod = ApiConfig::for_host("someone.github.io");
    assert_eq!(prod.base_url, PRODUCTION_BASE_URL);
    assert_eq!(prod.timeout, Duration::from_secs(15));
    assert!(prod.proxy.is_none());
}

#[test]
fn endpoint_joins_without_double_slash() {
    let cfg = ApiConfig::default().with_base_url("http://127.0.0.1:8080/");
    assert_eq!(
        cfg.endpoint(config::SEARCH_PATH),
        "http://127.0.0.1:8080/api/search"
    );
    assert_eq!(
        ApiConfig::default().endpoint(config::DEALS_PATH),
        "http://localhost:5001/api/deals"
    );
}
