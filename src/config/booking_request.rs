use crate::config::toml_config::substitute_env_vars;
use crate::domain::catalog;
use crate::domain::model::ContactInfo;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{self, Validate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 以 TOML 描述的一筆預約，依精靈步驟順序逐一套用
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub service: String,
    pub vehicle_type: String,
    pub year: i32,
    pub make: String,
    pub model: String,
    #[serde(default)]
    pub addons: Vec<String>,
    pub date: NaiveDate,
    pub time: String,
    pub contact: ContactInfo,
}

impl BookingRequest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(&substitute_env_vars(content)).map_err(|e| {
            BookingError::ConfigValidationError {
                field: "request".to_string(),
                message: format!("TOML parsing error: {}", e),
            }
        })
    }
}

impl Validate for BookingRequest {
    /// 只檢查目錄中找不到的值；步驟間的相依關係交給精靈判斷
    fn validate(&self) -> Result<()> {
        let service_names: Vec<&str> = catalog::SERVICES.iter().map(|s| s.name).collect();
        validation::validate_one_of("service", &self.service, &service_names)?;

        let type_ids: Vec<&str> = catalog::VEHICLE_TYPES.iter().map(|t| t.id).collect();
        validation::validate_one_of("vehicle_type", &self.vehicle_type, &type_ids)?;

        let addon_names: Vec<&str> = catalog::ADDONS.iter().map(|a| a.name).collect();
        for addon in &self.addons {
            validation::validate_one_of("addons", addon, &addon_names)?;
        }

        validation::validate_one_of("time", &self.time, catalog::TIME_SLOTS)?;
        validation::validate_required_text("contact.name", &self.contact.name)?;
        validation::validate_required_text("contact.email", &self.contact.email)?;
        validation::validate_required_text("contact.phone", &self.contact.phone)?;
        Ok(())
    }
}
