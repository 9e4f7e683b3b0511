use thiserror::Error;

#[derive(Debug, Error)]
pub enum DealError {
    #[error("request timed out — the deals backend may be asleep or unreachable")]
    Timeout,

    #[error("connection failed — check the backend is running ({0})")]
    ConnectionFailed(String),

    #[error("DNS resolution failed for {0}")]
    DnsResolution(String),

    #[error("proxy error — check your --proxy URL is correct ({0})")]
    ProxyError(String),

    #[error("TLS/SSL error — connection to the backend failed ({0})")]
    TlsError(String),

    #[error("unexpected HTTP status {0} from the deals backend")]
    HttpStatus(u16),

    #[error("failed to decode response body — {0}")]
    Decode(String),

    #[error("failed to read results snapshot — {0}")]
    Snapshot(String),

    #[error("backend reported failure: {0}")]
    Unsuccessful(String),

    #[error("invalid airport code \"{0}\" — must be exactly 3 letters (e.g. EMA, ALC, BCN)")]
    InvalidAirport(String),

    #[error("invalid date \"{0}\" — must be YYYY-MM-DD format (e.g. 2026-09-15)")]
    InvalidDate(String),

    #[error("{0}")]
    Validation(String),
}

impl DealError {
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidAirport(_) | Self::InvalidDate(_) | Self::Validation(_)
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::ConnectionFailed(_) => "connection_failed",
            Self::DnsResolution(_) => "dns_error",
            Self::ProxyError(_) => "proxy_error",
            Self::TlsError(_) => "tls_error",
            Self::HttpStatus(_) => "http_error",
            Self::Decode(_) => "decode_error",
            Self::Snapshot(_) => "snapshot_error",
            Self::Unsuccessful(_) => "backend_failure",
            Self::InvalidAirport(_) => "invalid_airport",
            Self::InvalidDate(_) => "invalid_date",
            Self::Validation(_) => "validation_error",
        }
    }
}

pub fn from_http_error(err: wreq::Error) -> DealError {
    let msg = err.to_string();
    let lower = msg.to_lowercase();

    if err.is_timeout() {
        return DealError::Timeout;
    }

    if err.is_connect() {
        if lower.contains("dns") || lower.contains("resolve") || lower.contains("getaddrinfo") {
            return DealError::DnsResolution(msg);
        }
        return DealError::ConnectionFailed(msg);
    }

    if lower.contains("proxy") || lower.contains("socks") {
        return DealError::ProxyError(msg);
    }

    if lower.contains("tls") || lower.contains("ssl") || lower.contains("certificate") {
        return DealError::TlsError(msg);
    }

    DealError::ConnectionFailed(msg)
}
