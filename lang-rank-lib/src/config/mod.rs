//! Configuration file handling

use crate::Result;
use crate::enumeration::{ConfiguredLanguages, RetryPolicy};
use crate::record::KeywordKey;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File name looked up in the current directory when no configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "lang-rank.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Topics to rank languages for, enumerated in this order after the baseline
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Retries after the first failed attempt of a lookup
    #[serde(default = "default_retry_limit")]
    pub retry_limit: u32,

    /// Pause after every search request
    #[serde(default = "default_request_delay", with = "humantime_serde")]
    pub request_delay: Duration,

    /// Longest a single search request may take before it counts as a failed attempt
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Maximum number of languages taken from the ranked list
    #[serde(default = "default_language_limit")]
    pub language_limit: usize,

    /// Ranked language list, most repositories first
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Text file holding the ranked language list, one per line; overrides `languages`
    #[serde(default)]
    pub languages_file: Option<Utf8PathBuf>,

    /// Base URL of the GitHub REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

/// The list-valued defaults of `default_config.toml`.
#[derive(Deserialize)]
struct DefaultLists {
    keywords: Vec<String>,
    languages: Vec<String>,
}

fn default_lists() -> DefaultLists {
    toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should define keywords and languages")
}

fn default_keywords() -> Vec<String> {
    default_lists().keywords
}

fn default_languages() -> Vec<String> {
    default_lists().languages
}

const fn default_retry_limit() -> u32 {
    crate::enumeration::DEFAULT_RETRY_LIMIT
}

const fn default_request_delay() -> Duration {
    crate::enumeration::DEFAULT_REQUEST_DELAY
}

const fn default_request_timeout() -> Duration {
    crate::enumeration::DEFAULT_REQUEST_TIMEOUT
}

const fn default_language_limit() -> usize {
    200
}

fn default_api_base_url() -> String {
    crate::search::GITHUB_API_URL.to_string()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `lang-rank.toml` in `base_dir` is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or fails validation
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading lang-rank configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading lang-rank configuration file '{path}'")),
            }
        };

        let mut config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;

        // a relative language file is relative to the configuration file that names it
        if let Some(file) = &config.languages_file
            && file.is_relative()
            && let Some(parent) = final_path.parent()
        {
            config.languages_file = Some(parent.join(file));
        }

        config
            .validate()
            .into_app_err_with(|| format!("invalid configuration file '{final_path}'"))?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retry_limit: self.retry_limit,
            delay: self.request_delay,
            timeout: self.request_timeout,
        }
    }

    /// The language source described by this configuration.
    #[must_use]
    pub fn language_source(&self) -> ConfiguredLanguages {
        ConfiguredLanguages::new(self.languages.clone(), self.languages_file.clone())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if keywords are blank, duplicated, or reserved, or if other values are out of range
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for keyword in &self.keywords {
            if keyword.trim().is_empty() {
                return Err(app_err!("keywords must not be blank"));
            }

            if keyword == KeywordKey::BASELINE_SENTINEL {
                return Err(app_err!("'{keyword}' is reserved for the unfiltered baseline and cannot be used as a keyword"));
            }

            if !seen.insert(keyword.as_str()) {
                return Err(app_err!("keyword '{keyword}' is listed more than once"));
            }
        }

        if self.request_timeout.is_zero() {
            return Err(app_err!("request_timeout must be greater than 0"));
        }

        if self.language_limit == 0 {
            return Err(app_err!("language_limit must be greater than 0"));
        }

        if self.languages.is_empty() && self.languages_file.is_none() {
            return Err(app_err!("either languages or languages_file must be set"));
        }

        let _ = url::Url::parse(&self.api_base_url).map_err(|e| app_err!("api_base_url '{}' is not a valid URL: {e}", self.api_base_url))?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
