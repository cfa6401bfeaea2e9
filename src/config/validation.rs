use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API domain cannot be empty
/// - API domain must be a valid URL or domain name
/// - If log file path is provided, it cannot be empty
/// - Log file path parent directory must exist or be creatable
/// - HTTP timeout must be at least one second
pub fn validate_config(
    api_domain: &str,
    log_file_path: &Option<String>,
    http_timeout_seconds: u64,
) -> Result<(), AppError> {
    if api_domain.is_empty() {
        return Err(AppError::config_error("API domain cannot be empty"));
    }

    if !api_domain.starts_with("http://") && !api_domain.starts_with("https://") {
        // Without a scheme it should at least look like a host
        if !api_domain.contains('.') && !is_loopback_host(api_domain) {
            return Err(AppError::config_error(
                "API domain must be a valid URL or domain name",
            ));
        }
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    Ok(())
}

/// Weather settings are optional, but when present they must be usable.
///
/// - City, if set, cannot be empty
/// - Base URL, if set, must be an `http://` or `https://` URL
pub fn validate_weather(
    weather_city: &Option<String>,
    weather_api_url: &Option<String>,
) -> Result<(), AppError> {
    if weather_city.as_deref().is_some_and(|city| city.trim().is_empty()) {
        return Err(AppError::config_error("Weather city cannot be empty"));
    }

    if let Some(url) = weather_api_url
        && !url.starts_with("http://")
        && !url.starts_with("https://")
    {
        return Err(AppError::config_error(
            "Weather API URL must start with http:// or https://",
        ));
    }

    Ok(())
}

/// Adds a scheme to a bare domain and strips trailing slashes.
///
/// Loopback hosts keep (or get) `http://` since the local API is plain HTTP;
/// every other host is upgraded to `https://`.
pub fn normalize_api_domain(api_domain: &str) -> String {
    let trimmed = api_domain.trim().trim_end_matches('/');
    let host = trimmed
        .trim_start_matches("https://")
        .trim_start_matches("http://");

    if is_loopback_host(host) {
        if trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{host}")
        }
    } else {
        format!("https://{host}")
    }
}

fn is_loopback_host(host: &str) -> bool {
    host.starts_with("localhost") || host.starts_with("127.0.0.1") || host.starts_with("[::1]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_api_domain() {
        assert_eq!(normalize_api_domain("api.example.com"), "https://api.example.com");
        assert_eq!(
            normalize_api_domain("http://api.example.com/"),
            "https://api.example.com"
        );
        assert_eq!(normalize_api_domain("localhost:8080"), "http://localhost:8080");
        assert_eq!(
            normalize_api_domain("http://127.0.0.1:8080"),
            "http://127.0.0.1:8080"
        );
        assert_eq!(
            normalize_api_domain("https://localhost:8443"),
            "https://localhost:8443"
        );
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let result = validate_config("http://localhost:8080", &None, 0);
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validate_accepts_localhost_without_scheme() {
        assert!(validate_config("localhost:8080", &None, 30).is_ok());
    }
}
