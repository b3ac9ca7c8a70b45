use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use folio_contact::{EMAILJS_ENDPOINT, HostedConfig, Locale};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    pub contact: ContactConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_github_url")]
    pub github_url: String,
    #[serde(default = "default_linkedin_url")]
    pub linkedin_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            github_url: default_github_url(),
            linkedin_url: default_linkedin_url(),
        }
    }
}

impl SiteConfig {
    /// Falls back to Spanish when the configured value is not a supported locale.
    pub fn locale(&self) -> Locale {
        self.default_locale.parse().unwrap_or_default()
    }
}

fn default_locale() -> String {
    "es".to_string()
}

fn default_github_url() -> String {
    "https://github.com/radavilae".to_string()
}

fn default_linkedin_url() -> String {
    "https://www.linkedin.com/in/radavilae/".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContactConfig {
    pub recipient: String,
    #[serde(default)]
    pub emailjs: EmailJsConfig,
}

/// Hosted delivery account. Values left at their `YOUR_*` placeholders
/// select the mailto fallback.
#[derive(Debug, Deserialize, Clone)]
pub struct EmailJsConfig {
    #[serde(default = "default_emailjs_endpoint")]
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl Default for EmailJsConfig {
    fn default() -> Self {
        let HostedConfig {
            service_id,
            template_id,
            public_key,
        } = HostedConfig::default();

        Self {
            endpoint: default_emailjs_endpoint(),
            service_id,
            template_id,
            public_key,
        }
    }
}

impl EmailJsConfig {
    pub fn hosted(&self) -> HostedConfig {
        HostedConfig {
            service_id: self.service_id.to_owned(),
            template_id: self.template_id.to_owned(),
            public_key: self.public_key.to_owned(),
        }
    }
}

fn default_emailjs_endpoint() -> String {
    EMAILJS_ENDPOINT.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Legacy EMAILJS_* variables
    /// 2. Environment variables (FOLIO__CONTACT__RECIPIENT, etc.)
    /// 3. Config file specified by path
    /// 4. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let placeholders = HostedConfig::default();

        builder = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("contact.recipient", "raul.davila.esp@gmail.com")?
            .set_default("contact.emailjs.endpoint", EMAILJS_ENDPOINT)?
            .set_default("contact.emailjs.service_id", placeholders.service_id)?
            .set_default("contact.emailjs.template_id", placeholders.template_id)?
            .set_default("contact.emailjs.public_key", placeholders.public_key)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional: a missing file leaves the defaults in place.
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(service_id) = env::var("EMAILJS_SERVICE_ID") {
            builder = builder.set_override("contact.emailjs.service_id", service_id)?;
        }
        if let Ok(template_id) = env::var("EMAILJS_TEMPLATE_ID") {
            builder = builder.set_override("contact.emailjs.template_id", template_id)?;
        }
        if let Ok(public_key) = env::var("EMAILJS_PUBLIC_KEY") {
            builder = builder.set_override("contact.emailjs.public_key", public_key)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.site.default_locale.parse::<Locale>().is_err() {
            return Err(format!(
                "Unsupported default locale '{}', expected 'es' or 'en'",
                self.site.default_locale
            ));
        }
        if !self.contact.recipient.contains('@') {
            return Err("Contact recipient must be an email address".to_string());
        }
        if !matches!(self.observability.format.as_str(), "pretty" | "json") {
            return Err("Log format must be 'pretty' or 'json'".to_string());
        }
        Ok(())
    }
}
