use crate::config::booking_request::BookingRequest;
use crate::core::calendar::{
    calendar_options, ics_filename, CalendarExporter, CalendarTarget, ExportAction,
};
use crate::core::wizard::BookingWizard;
use crate::domain::model::{PlatformInfo, Step};
use crate::domain::ports::{BookingSubmitter, Clock, Storage};
use crate::utils::error::Result;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarLink {
    pub name: &'static str,
    pub url: String,
}

/// 完成預約後的摘要與行事曆連結
#[derive(Debug, Clone, Serialize)]
pub struct BookingReceipt {
    pub service: String,
    pub vehicle: String,
    pub date: NaiveDate,
    pub time: String,
    pub ics_path: String,
    pub links: Vec<CalendarLink>,
}

/// 依序把 `BookingRequest` 套進精靈，送出後匯出行事曆
pub struct BookingEngine<S: BookingSubmitter, C: Clock, St: Storage> {
    wizard: BookingWizard<S, C>,
    exporter: CalendarExporter,
    storage: St,
}

impl<S: BookingSubmitter, C: Clock, St: Storage> BookingEngine<S, C, St> {
    pub fn new(wizard: BookingWizard<S, C>, exporter: CalendarExporter, storage: St) -> Self {
        Self {
            wizard,
            exporter,
            storage,
        }
    }

    pub fn wizard(&self) -> &BookingWizard<S, C> {
        &self.wizard
    }

    pub async fn run(
        &mut self,
        request: &BookingRequest,
        platform: PlatformInfo,
    ) -> Result<BookingReceipt> {
        tracing::info!("🚀 Starting booking for {}", request.service);
        self.walk_wizard(request).await?;

        tracing::info!("📅 Exporting appointment to calendar");
        self.export(platform).await
    }

    async fn walk_wizard(&mut self, request: &BookingRequest) -> Result<()> {
        let wizard = &mut self.wizard;
        wizard.start_new_booking();

        wizard.select_service(&request.service)?;
        wizard.select_vehicle_type(&request.vehicle_type)?;
        wizard.select_year(request.year)?;
        wizard.select_make(&request.make)?;
        wizard.select_model(&request.model)?;

        if wizard.step() == Step::Addons {
            for addon in &request.addons {
                wizard.toggle_addon(addon)?;
            }
            wizard.confirm_addons()?;
        } else if !request.addons.is_empty() {
            tracing::warn!(
                "⚠️ {} does not offer add-ons, ignoring: {}",
                request.service,
                request.addons.join(", ")
            );
        }

        wizard.select_date(request.date)?;
        wizard.select_time(&request.time)?;
        wizard.proceed_to_contact()?;

        tracing::info!(
            "📋 Step {}/{} reached, submitting contact details",
            wizard.current_step_number(),
            wizard.total_steps()
        );
        wizard.submit_contact(request.contact.clone()).await
    }

    async fn export(&self, platform: PlatformInfo) -> Result<BookingReceipt> {
        let draft = self.wizard.draft();
        let event = self.exporter.build_event(draft)?;
        let service = draft.selected_service.clone().unwrap_or_default();

        let ics = self
            .exporter
            .to_ics_at(&event, self.wizard.clock().now());
        let ics_path = self
            .storage
            .write_file(&ics_filename(&service), ics.as_bytes())
            .await?;
        tracing::info!("📁 Calendar file saved to: {}", ics_path);

        let links = calendar_options(platform)
            .into_iter()
            .map(|option| {
                let url = match option.target {
                    CalendarTarget::Provider(provider) => {
                        self.exporter.provider_url(provider, &event)
                    }
                    CalendarTarget::AppleNative => {
                        match self.exporter.apple_calendar_action(platform, &event) {
                            ExportAction::OpenUrl(url) => url,
                            ExportAction::DownloadIcs(_) => ics_path.clone(),
                        }
                    }
                    CalendarTarget::IcsFile => ics_path.clone(),
                };
                CalendarLink {
                    name: option.name,
                    url,
                }
            })
            .collect();

        Ok(BookingReceipt {
            service,
            vehicle: draft.vehicle_description(),
            date: event.start.date_naive(),
            time: draft.selected_time.clone().unwrap_or_default(),
            ics_path,
            links,
        })
    }
}
