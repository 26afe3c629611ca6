use crate::config::toml_config::BookingConfig;
use crate::domain::model::BookingPayload;
use crate::domain::ports::{BookingSubmitter, ConfigProvider};
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub endpoint: String,
    pub template: String,
    pub captcha: bool,
    pub subject_prefix: String,
    pub timeout: Duration,
}

impl RelaySettings {
    pub fn from_config(config: &BookingConfig) -> Self {
        Self {
            endpoint: config.relay_endpoint().to_string(),
            template: config.relay_template().to_string(),
            captcha: config.relay_captcha(),
            subject_prefix: config.subject_prefix().to_string(),
            timeout: Duration::from_secs(config.timeout_seconds()),
        }
    }
}

/// 轉發服務的請求本文：預約欄位加上以底線開頭的路由欄位
#[derive(Debug, Serialize)]
struct RelayRequest<'a> {
    #[serde(flatten)]
    booking: &'a BookingPayload,
    #[serde(rename = "_subject")]
    subject: String,
    #[serde(rename = "_template")]
    template: &'a str,
    #[serde(rename = "_captcha")]
    captcha: String,
}

#[derive(Debug, Deserialize)]
struct RelayResponse {
    #[serde(default)]
    success: serde_json::Value,
    #[serde(default)]
    message: Option<String>,
}

impl RelayResponse {
    /// 服務有時回傳字串 "true"
    fn is_success(&self) -> bool {
        match &self.success {
            serde_json::Value::Bool(flag) => *flag,
            serde_json::Value::String(flag) => flag == "true",
            _ => false,
        }
    }
}

/// 把預約以 JSON POST 到表單轉發端點
pub struct FormRelaySubmitter {
    client: Client,
    settings: RelaySettings,
}

impl FormRelaySubmitter {
    pub fn new(settings: RelaySettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &RelaySettings {
        &self.settings
    }
}

#[async_trait]
impl BookingSubmitter for FormRelaySubmitter {
    async fn submit(&self, payload: &BookingPayload) -> Result<()> {
        let body = RelayRequest {
            booking: payload,
            subject: format!("{}: {}", self.settings.subject_prefix, payload.service),
            template: &self.settings.template,
            captcha: self.settings.captcha.to_string(),
        };

        tracing::debug!("POST {}", self.settings.endpoint);
        let response = self
            .client
            .post(&self.settings.endpoint)
            .header(ACCEPT, "application/json")
            .timeout(self.settings.timeout)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Relay response status: {}", status);
        if !status.is_success() {
            return Err(BookingError::SubmissionRejected {
                message: format!("relay responded with HTTP {}", status),
            });
        }

        let reply: RelayResponse = response.json().await?;
        if reply.is_success() {
            Ok(())
        } else {
            Err(BookingError::SubmissionRejected {
                message: reply
                    .message
                    .unwrap_or_else(|| "relay did not report success".to_string()),
            })
        }
    }
}

/// 不送出，只記錄本文；給 `--dry-run` 使用
#[derive(Debug, Clone, Default)]
pub struct DryRunSubmitter;

#[async_trait]
impl BookingSubmitter for DryRunSubmitter {
    async fn submit(&self, payload: &BookingPayload) -> Result<()> {
        let json = serde_json::to_string_pretty(payload)?;
        tracing::info!("🔍 DRY RUN - booking not sent:\n{}", json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn payload() -> BookingPayload {
        BookingPayload {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            service: "Consultation".to_string(),
            vehicle_type: "SUV".to_string(),
            vehicle: "2020 Ford Edge".to_string(),
            date: "10/26/2026".to_string(),
            time: "9:00 AM".to_string(),
            addons: "None".to_string(),
            notes: "No additional notes".to_string(),
        }
    }

    fn submitter(server: &MockServer) -> FormRelaySubmitter {
        FormRelaySubmitter::new(RelaySettings {
            endpoint: server.url("/ajax/shop@example.com"),
            template: "table".to_string(),
            captcha: false,
            subject_prefix: "New Booking".to_string(),
            timeout: Duration::from_secs(5),
        })
    }

    #[tokio::test]
    async fn test_submit_posts_payload_with_routing_fields() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/ajax/shop@example.com")
                .header("accept", "application/json")
                .json_body(serde_json::json!({
                    "name": "Jane Doe",
                    "email": "jane@example.com",
                    "phone": "(555) 123-4567",
                    "service": "Consultation",
                    "vehicleType": "SUV",
                    "vehicle": "2020 Ford Edge",
                    "date": "10/26/2026",
                    "time": "9:00 AM",
                    "addons": "None",
                    "notes": "No additional notes",
                    "_subject": "New Booking: Consultation",
                    "_template": "table",
                    "_captcha": "false"
                }));
            then.status(200)
                .json_body(serde_json::json!({ "success": "true", "message": "sent" }));
        });

        submitter(&server).submit(&payload()).await.unwrap();
        mock.assert();
    }

    #[tokio::test]
    async fn test_unsuccessful_reply_is_rejected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(200)
                .json_body(serde_json::json!({ "success": false, "message": "Form not activated" }));
        });

        let err = submitter(&server).submit(&payload()).await.unwrap_err();
        assert!(matches!(
            &err,
            BookingError::SubmissionRejected { message } if message == "Form not activated"
        ));
        assert_eq!(
            err.user_friendly_message(),
            "Failed to submit booking. Please try again."
        );
    }

    #[tokio::test]
    async fn test_http_error_status_is_rejected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST);
            then.status(500);
        });

        let err = submitter(&server).submit(&payload()).await.unwrap_err();
        assert!(matches!(err, BookingError::SubmissionRejected { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_network_error() {
        let submitter = FormRelaySubmitter::new(RelaySettings {
            endpoint: "http://127.0.0.1:9/ajax".to_string(),
            template: "table".to_string(),
            captcha: false,
            subject_prefix: "New Booking".to_string(),
            timeout: Duration::from_secs(2),
        });

        let err = submitter.submit(&payload()).await.unwrap_err();
        assert!(matches!(err, BookingError::ApiError(_)));
        assert_eq!(
            err.user_friendly_message(),
            "Network error. Please check your connection and try again."
        );
    }

    #[tokio::test]
    async fn test_dry_run_always_succeeds() {
        assert!(DryRunSubmitter.submit(&payload()).await.is_ok());
    }

    #[test]
    fn test_relay_settings_from_config() {
        let config = BookingConfig::from_toml_str(
            "[relay]\nendpoint = \"https://relay.example.com/ajax\"\ncaptcha = true\n",
        )
        .unwrap();
        let settings = RelaySettings::from_config(&config);

        assert_eq!(settings.endpoint, "https://relay.example.com/ajax");
        assert_eq!(settings.template, "table");
        assert!(settings.captcha);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }
}
