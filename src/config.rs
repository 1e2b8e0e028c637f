use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::FixedOffset;
use dotenvy::dotenv;

use crate::attendance::clock::parse_utc_offset;
use crate::attendance::status::StatusThresholds;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    /// MySQL URL; without it the service runs on the in-memory store
    pub database_url: Option<String>,
    pub api_prefix: String,

    // Rate limiting
    pub rate_attendance_per_min: u32,

    /// Organisation's civil zone, the one "today" is resolved in
    pub utc_offset: FixedOffset,
    pub thresholds: StatusThresholds,

    pub log_dir: String,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var_or(key, default)
        .parse()
        .with_context(|| format!("{key} is not valid"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let utc_offset = parse_utc_offset(&var_or("ATTENDANCE_UTC_OFFSET", "+00:00"))
            .context("ATTENDANCE_UTC_OFFSET is not valid")?;

        let thresholds = StatusThresholds::from_hours(
            parse_var("HALF_DAY_HOURS", "4")?,
            parse_var("FULL_DAY_HOURS", "8")?,
        )?;

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "127.0.0.1:8080"),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            api_prefix: var_or("API_PREFIX", "/api"),
            rate_attendance_per_min: parse_var("RATE_ATTENDANCE_PER_MIN", "120")?,
            utc_offset,
            thresholds,
            log_dir: var_or("LOG_DIR", "logs"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_variables_fall_back_to_defaults() {
        let value: u32 = parse_var("ATTENDANCE_TEST_UNSET_RATE", "120").unwrap();
        assert_eq!(value, 120);
        assert_eq!(var_or("ATTENDANCE_TEST_UNSET_PREFIX", "/api"), "/api");
    }

    #[test]
    fn test_unparsable_value_names_the_variable() {
        let err = parse_var::<u32>("ATTENDANCE_TEST_UNSET_RATE", "lots").unwrap_err();
        assert!(err.to_string().contains("ATTENDANCE_TEST_UNSET_RATE"));
    }
}
