use crate::core::calendar::CalendarSettings;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern compiles"));

/// 表單轉發服務支援的郵件版型
pub const RELAY_TEMPLATES: &[&str] = &["basic", "table", "box"];

/// 預約工具的 TOML 配置；每個區段與欄位都可省略
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingConfig {
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelayConfig {
    pub endpoint: Option<String>,
    pub template: Option<String>,
    pub captcha: Option<bool>,
    pub subject_prefix: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub location: Option<String>,
    pub prodid: Option<String>,
    pub uid_domain: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

impl BookingConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    pub fn relay_template(&self) -> &str {
        self.relay.template.as_deref().unwrap_or("table")
    }

    pub fn relay_captcha(&self) -> bool {
        self.relay.captcha.unwrap_or(false)
    }

    pub fn subject_prefix(&self) -> &str {
        self.relay.subject_prefix.as_deref().unwrap_or("New Booking")
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.relay.timeout_seconds.unwrap_or(30)
    }

    pub fn calendar_settings(&self) -> CalendarSettings {
        let defaults = CalendarSettings::default();
        CalendarSettings {
            location: self.calendar.location.clone().unwrap_or(defaults.location),
            prodid: self.calendar.prodid.clone().unwrap_or(defaults.prodid),
            uid_domain: self
                .calendar
                .uid_domain
                .clone()
                .unwrap_or(defaults.uid_domain),
        }
    }
}

/// 替換環境變數 (例如 ${RELAY_ENDPOINT})；未設定的變數保持原樣
pub fn substitute_env_vars(content: &str) -> String {
    ENV_VAR
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}

impl ConfigProvider for BookingConfig {
    fn relay_endpoint(&self) -> &str {
        self.relay.endpoint.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or("./output")
    }
}

impl Validate for BookingConfig {
    fn validate(&self) -> Result<()> {
        if let Some(endpoint) = &self.relay.endpoint {
            validation::validate_url("relay.endpoint", endpoint)?;
        }
        validation::validate_path("output.path", self.output_path())?;
        validation::validate_one_of("relay.template", self.relay_template(), RELAY_TEMPLATES)?;
        validation::validate_non_empty_string(
            "calendar.uid_domain",
            &self.calendar_settings().uid_domain,
        )?;

        if self.timeout_seconds() == 0 {
            return Err(BookingError::InvalidFieldValue {
                field: "relay.timeout_seconds".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be at least one second".to_string(),
            });
        }

        Ok(())
    }
}
