use anyhow::{Context, Result, anyhow};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub port: u16,
    pub secure_cookies: bool,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::load(|key| std::env::var(key).ok())
    }

    pub fn load<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = normalize_base_url(
            &lookup("API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;

        let port = lookup("PORT")
            .map(|raw| raw.parse::<u16>())
            .transpose()
            .context("PORT must be a valid u16 integer")?
            .unwrap_or(3000);

        let app_env = lookup("APP_ENV").unwrap_or_else(|| "development".to_string());
        let secure_cookies = app_env == "production";

        let refresh_interval_secs = lookup("REFRESH_INTERVAL_SECS")
            .map(|raw| raw.parse::<u64>())
            .transpose()
            .context("REFRESH_INTERVAL_SECS must be a valid u64 integer")?
            .unwrap_or(300);

        if refresh_interval_secs == 0 {
            return Err(anyhow!("REFRESH_INTERVAL_SECS must be greater than zero"));
        }

        let request_timeout_secs = lookup("REQUEST_TIMEOUT_SECS")
            .map(|raw| raw.parse::<u64>())
            .transpose()
            .context("REQUEST_TIMEOUT_SECS must be a valid u64 integer")?
            .unwrap_or(10);

        let is_dev = parse_flag(lookup("DEV_MODE"), "DEV_MODE")?;
        let enable_file_log = parse_flag(lookup("ENABLE_FILE_LOG"), "ENABLE_FILE_LOG")?;

        Ok(Self {
            api_url,
            port,
            secure_cookies,
            refresh_interval_secs,
            request_timeout_secs,
            is_dev,
            enable_file_log,
        })
    }
}

fn parse_flag(raw: Option<String>, name: &str) -> Result<bool> {
    match raw.as_deref() {
        None | Some("") => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some("false") | Some("0") => Ok(false),
        Some(other) => Err(anyhow!("{name} must be 'true' or 'false', got '{other}'")),
    }
}

/// Trailing slashes collapse to exactly one so relative endpoint paths join
/// under the base instead of replacing its last segment.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(anyhow!("API_URL must be an http(s) URL, got '{raw}'"));
    }

    Ok(format!("{trimmed}/"))
}
