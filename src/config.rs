use crate::error::{Error, Result};
use crate::models::curator::{CuratorIdentity, CURATOR_ROLE};
use crate::utils::time::{offset_from_minutes, parse_locale};
use chrono::{FixedOffset, Locale, Offset, Utc};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub job_api_url: String,
    pub stack_options_url: Option<String>,
    pub requisites_options_url: Option<String>,
    pub company_options_url: Option<String>,
    pub success_message: String,
    pub blob_locale: String,
    pub blob_utc_offset_minutes: i32,
    pub create_timeout_secs: u64,
    pub curator_id: Option<i64>,
    pub curator_name: Option<String>,
    pub curator_roles: Vec<String>,
    pub indicated_by: Option<i64>,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

pub const DEFAULT_SUCCESS_MESSAGE: &str = "Cadastrado com sucesso";
pub const DEFAULT_BLOB_LOCALE: &str = "pt_BR";
pub const DEFAULT_BLOB_UTC_OFFSET_MINUTES: i32 = -180;
pub const DEFAULT_CREATE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PENDING_MESSAGE: &str = "Cadastrando...";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            job_api_url: get_env("JOB_API_URL")?,
            stack_options_url: get_env_opt("STACK_OPTIONS_URL"),
            requisites_options_url: get_env_opt("REQUISITES_OPTIONS_URL"),
            company_options_url: get_env_opt("COMPANY_OPTIONS_URL"),
            success_message: get_env_opt("SUCCESS_MESSAGE")
                .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string()),
            blob_locale: get_env_opt("BLOB_LOCALE")
                .unwrap_or_else(|| DEFAULT_BLOB_LOCALE.to_string()),
            blob_utc_offset_minutes: get_env_parse_or(
                "BLOB_UTC_OFFSET_MINUTES",
                DEFAULT_BLOB_UTC_OFFSET_MINUTES,
            )?,
            create_timeout_secs: get_env_parse_or(
                "CREATE_TIMEOUT_SECS",
                DEFAULT_CREATE_TIMEOUT_SECS,
            )?,
            curator_id: get_env_parse_opt("CURATOR_ID")?,
            curator_name: get_env_opt("CURATOR_NAME"),
            curator_roles: get_env_opt("CURATOR_ROLES")
                .map(|raw| parse_list(&raw))
                .unwrap_or_default(),
            indicated_by: get_env_parse_opt("INDICATED_BY")?,
        })
    }
}

impl Config {
    /// Curator configured for headless submissions, when both id and name are set.
    pub fn curator(&self) -> Option<CuratorIdentity> {
        let id = self.curator_id?;
        let name = self.curator_name.clone()?;
        let roles = if self.curator_roles.is_empty() {
            vec![CURATOR_ROLE.to_string()]
        } else {
            self.curator_roles.clone()
        };
        Some(CuratorIdentity { id, name, roles })
    }
}

#[derive(Debug, Clone)]
pub struct FormSettings {
    pub success_message: String,
    pub pending_message: String,
    pub curator_role: String,
    pub blob_locale: Locale,
    pub blob_offset: FixedOffset,
    pub create_timeout: Option<Duration>,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            success_message: DEFAULT_SUCCESS_MESSAGE.to_string(),
            pending_message: DEFAULT_PENDING_MESSAGE.to_string(),
            curator_role: CURATOR_ROLE.to_string(),
            blob_locale: Locale::pt_BR,
            blob_offset: FixedOffset::east_opt(DEFAULT_BLOB_UTC_OFFSET_MINUTES * 60)
                .unwrap_or(Utc.fix()),
            create_timeout: Some(Duration::from_secs(DEFAULT_CREATE_TIMEOUT_SECS)),
        }
    }
}

impl FormSettings {
    pub fn from_config(config: &Config) -> Result<Self> {
        let blob_locale = parse_locale(&config.blob_locale)
            .map_err(|e| Error::Config(format!("Invalid value for BLOB_LOCALE: {}", e)))?;
        let blob_offset = offset_from_minutes(config.blob_utc_offset_minutes).map_err(|e| {
            Error::Config(format!("Invalid value for BLOB_UTC_OFFSET_MINUTES: {}", e))
        })?;
        let create_timeout =
            (config.create_timeout_secs > 0).then(|| Duration::from_secs(config.create_timeout_secs));

        Ok(Self {
            success_message: config.success_message.clone(),
            blob_locale,
            blob_offset,
            create_timeout,
            ..Self::default()
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn get_env_parse_opt<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_opt(name)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
        })
        .transpose()
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    Ok(get_env_parse_opt(name)?.unwrap_or(default))
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            job_api_url: "http://localhost/jobs".into(),
            stack_options_url: None,
            requisites_options_url: None,
            company_options_url: None,
            success_message: DEFAULT_SUCCESS_MESSAGE.into(),
            blob_locale: "en_US".into(),
            blob_utc_offset_minutes: 60,
            create_timeout_secs: 0,
            curator_id: Some(4),
            curator_name: Some("Jane".into()),
            curator_roles: vec![],
            indicated_by: None,
        }
    }

    #[test]
    fn settings_follow_config() {
        let settings = FormSettings::from_config(&sample_config()).unwrap();
        assert_eq!(settings.blob_locale, Locale::en_US);
        assert_eq!(settings.blob_offset.local_minus_utc(), 3600);
        assert_eq!(settings.create_timeout, None);
    }

    #[test]
    fn default_settings_use_brasilia_offset() {
        assert_eq!(FormSettings::default().blob_offset.local_minus_utc(), -3 * 3600);
    }

    #[test]
    fn bad_locale_is_a_config_error() {
        let mut config = sample_config();
        config.blob_locale = "klingon".into();
        assert!(matches!(FormSettings::from_config(&config), Err(Error::Config(_))));
    }

    #[test]
    fn huge_offset_is_a_config_error() {
        let mut config = sample_config();
        config.blob_utc_offset_minutes = i32::MAX;
        assert!(matches!(FormSettings::from_config(&config), Err(Error::Config(_))));
    }

    #[test]
    fn curator_needs_id_and_name() {
        let mut config = sample_config();
        let curator = config.curator().unwrap();
        assert!(curator.has_role(CURATOR_ROLE));

        config.curator_name = None;
        assert!(config.curator().is_none());
    }

    #[test]
    fn parse_list_skips_blank_entries() {
        assert_eq!(
            parse_list(" curator, admin ,,"),
            vec!["curator".to_string(), "admin".to_string()]
        );
    }
}
