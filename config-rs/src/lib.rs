//! config-rs/lib.rs
//! Shared configuration utilities for the question transformation workspace
//! Resolves listen addresses, typed settings and secrets from the environment

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

/// Load a `.env` file from the working directory if one exists.
///
/// Returns `true` when a file was found and applied.
pub fn load_dotenv() -> bool {
    match dotenv::dotenv() {
        Ok(path) => {
            log::debug!("Loaded environment from {}", path.display());
            true
        }
        Err(_) => false,
    }
}

/// Get service port from environment variables with proper fallback
///
/// # Arguments
/// * `service_name` - The name of the service (e.g., "QUESTION_TRANSFORM")
/// * `default_port` - The default port to use if not specified in environment
///
/// # Returns
/// The port number read from `<SERVICE>_SERVICE_PORT`, or the default
pub fn get_service_port(service_name: &str, default_port: u16) -> u16 {
    let var_name = format!("{}_SERVICE_PORT", service_name.to_uppercase());
    match env::var(&var_name) {
        Ok(value) => value.parse::<u16>().unwrap_or_else(|_| {
            log::warn!("Invalid port in {}, using default {}", var_name, default_port);
            default_port
        }),
        Err(_) => default_port,
    }
}

/// Create a SocketAddr for binding a service
///
/// `<SERVICE>_SERVICE_ADDR` may hold a full address override, either as
/// `host:port` or `http://host:port`. Otherwise the service binds all
/// interfaces on the port from [`get_service_port`].
pub fn get_bind_address(service_name: &str, default_port: u16) -> SocketAddr {
    let var_name = format!("{}_SERVICE_ADDR", service_name.to_uppercase());

    if let Ok(addr_str) = env::var(&var_name) {
        if let Some(addr) = parse_socket_addr(&addr_str) {
            return addr;
        }
        log::warn!("Invalid address format in {}, using default", var_name);
    }

    let port = get_service_port(service_name, default_port);
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port)
}

fn parse_socket_addr(value: &str) -> Option<SocketAddr> {
    let trimmed = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"))
        .unwrap_or(value);
    trimmed.trim_end_matches('/').parse::<SocketAddr>().ok()
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is unset or does not parse.
pub fn get_env_var<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            log::warn!("Invalid value in {}, using default", name);
            default
        }),
        Err(_) => default,
    }
}

/// Read a string setting with a default.
pub fn get_env_string(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read a secret from the environment.
///
/// An unset variable and an empty (or whitespace-only) value are both
/// reported as `None`. The secret value itself is never logged.
pub fn get_secret(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        Ok(_) => {
            log::warn!("{} environment variable is empty", name);
            None
        }
        Err(_) => None,
    }
}

/// Get service name for logging and monitoring
pub fn get_formatted_service_name(service_name: &str) -> String {
    match service_name.to_uppercase().as_str() {
        "QUESTION_TRANSFORM" => "question-transform-service".to_string(),
        other => format!("{}-service", other.to_lowercase().replace('_', "-")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_service_port() {
        std::env::set_var("CFG_PORT_TEST_SERVICE_PORT", "9000");
        assert_eq!(get_service_port("CFG_PORT_TEST", 8000), 9000);

        std::env::set_var("CFG_BADPORT_TEST_SERVICE_PORT", "not-a-port");
        assert_eq!(get_service_port("CFG_BADPORT_TEST", 8000), 8000);

        std::env::remove_var("CFG_UNKNOWN_TEST_SERVICE_PORT");
        assert_eq!(get_service_port("CFG_UNKNOWN_TEST", 8000), 8000);
    }

    #[test]
    fn test_get_bind_address() {
        std::env::set_var("CFG_ADDR_TEST_SERVICE_ADDR", "127.0.0.1:9100");
        assert_eq!(
            get_bind_address("CFG_ADDR_TEST", 8000),
            "127.0.0.1:9100".parse::<SocketAddr>().unwrap()
        );

        std::env::set_var("CFG_URLADDR_TEST_SERVICE_ADDR", "http://127.0.0.1:9200");
        assert_eq!(
            get_bind_address("CFG_URLADDR_TEST", 8000),
            "127.0.0.1:9200".parse::<SocketAddr>().unwrap()
        );

        std::env::remove_var("CFG_DEFAULT_TEST_SERVICE_ADDR");
        std::env::remove_var("CFG_DEFAULT_TEST_SERVICE_PORT");
        assert_eq!(
            get_bind_address("CFG_DEFAULT_TEST", 8000),
            "0.0.0.0:8000".parse::<SocketAddr>().unwrap()
        );
    }

    #[test]
    fn test_get_env_var() {
        std::env::set_var("CFG_TIMEOUT_TEST", "45");
        assert_eq!(get_env_var::<u64>("CFG_TIMEOUT_TEST", 60), 45);

        std::env::set_var("CFG_TIMEOUT_BAD_TEST", "soon");
        assert_eq!(get_env_var::<u64>("CFG_TIMEOUT_BAD_TEST", 60), 60);

        std::env::remove_var("CFG_TIMEOUT_MISSING_TEST");
        assert_eq!(get_env_var::<u64>("CFG_TIMEOUT_MISSING_TEST", 60), 60);
    }

    #[test]
    fn test_get_env_string() {
        std::env::set_var("CFG_MODEL_TEST", "  some/model  ");
        assert_eq!(get_env_string("CFG_MODEL_TEST", "default"), "some/model");

        std::env::set_var("CFG_MODEL_EMPTY_TEST", "");
        assert_eq!(get_env_string("CFG_MODEL_EMPTY_TEST", "default"), "default");
    }

    #[test]
    fn test_get_secret_treats_empty_as_missing() {
        std::env::set_var("CFG_SECRET_TEST", "sk-test");
        assert_eq!(get_secret("CFG_SECRET_TEST"), Some("sk-test".to_string()));

        std::env::set_var("CFG_SECRET_BLANK_TEST", "   ");
        assert_eq!(get_secret("CFG_SECRET_BLANK_TEST"), None);

        std::env::remove_var("CFG_SECRET_MISSING_TEST");
        assert_eq!(get_secret("CFG_SECRET_MISSING_TEST"), None);
    }

    #[test]
    fn test_formatted_service_name() {
        assert_eq!(
            get_formatted_service_name("QUESTION_TRANSFORM"),
            "question-transform-service"
        );
        assert_eq!(get_formatted_service_name("API_GATEWAY"), "api-gateway-service");
    }
}
