use crate::core::calendar::vehicle_type_label;
use crate::core::month_view::{shift_month, MonthView};
use crate::domain::catalog::{self, Service};
use crate::domain::model::{
    BookingDraft, BookingPayload, ContactInfo, ProgressMetadata, Step, YmmSubstep,
};
use crate::domain::ports::{BookingSubmitter, Clock};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::validate_required_text;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const LABELS_WITH_ADDONS: [&str; 6] = ["Service", "Vehicle", "Details", "Add-ons", "Date", "Contact"];
const LABELS_WITHOUT_ADDONS: [&str; 5] = ["Service", "Vehicle", "Details", "Date", "Contact"];

/// 送出期間持有，離開（含被取消）時清除旗標
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 預約精靈：擁有單一工作階段的 `BookingDraft`，每個使用者動作對應一個方法。
///
/// 不合法的轉換會回傳 `BookingError::InvalidTransition`，且不改變狀態。
pub struct BookingWizard<S: BookingSubmitter, C: Clock> {
    draft: BookingDraft,
    submitter: S,
    clock: C,
    in_flight: Arc<AtomicBool>,
    last_error: Option<String>,
}

impl<S: BookingSubmitter, C: Clock> BookingWizard<S, C> {
    pub fn new(submitter: S, clock: C) -> Self {
        let draft = BookingDraft::new(clock.today());
        Self {
            draft,
            submitter,
            clock,
            in_flight: Arc::new(AtomicBool::new(false)),
            last_error: None,
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn step(&self) -> Step {
        self.draft.step
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// 讓畫面層可以在送出期間停用按鈕
    pub fn submission_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.in_flight)
    }

    pub fn selected_service_data(&self) -> Option<&'static Service> {
        self.draft
            .selected_service
            .as_deref()
            .and_then(catalog::find_service)
    }

    pub fn has_addons(&self) -> bool {
        self.selected_service_data()
            .map(|s| s.has_addons)
            .unwrap_or(false)
    }

    fn ensure_step(&self, operation: &'static str, expected: Step) -> Result<()> {
        if self.draft.step == expected {
            return Ok(());
        }
        tracing::warn!(
            "Rejected '{}' at {:?} (expected {:?})",
            operation,
            self.draft.step,
            expected
        );
        Err(BookingError::invalid_transition(
            operation,
            self.draft.step,
            format!("only allowed at {:?}", expected),
        ))
    }

    fn reject(&self, operation: &'static str, reason: impl Into<String>) -> BookingError {
        let reason = reason.into();
        tracing::warn!("Rejected '{}' at {:?}: {}", operation, self.draft.step, reason);
        BookingError::invalid_transition(operation, self.draft.step, reason)
    }

    pub fn select_service(&mut self, name: &str) -> Result<()> {
        self.ensure_step("select service", Step::Service)?;
        let service = catalog::find_service(name)
            .ok_or_else(|| self.reject("select service", format!("unknown service '{}'", name)))?;

        self.draft.selected_service = Some(service.name.to_string());
        // 換服務時舊的加購項目不再適用
        self.draft.selected_addons.clear();
        self.draft.step = Step::VehicleType;
        tracing::info!(
            "🧽 Service selected: {} (add-ons: {})",
            service.name,
            service.has_addons
        );
        Ok(())
    }

    pub fn select_vehicle_type(&mut self, id: &str) -> Result<()> {
        self.ensure_step("select vehicle type", Step::VehicleType)?;
        let vehicle_type = catalog::find_vehicle_type(id).ok_or_else(|| {
            self.reject("select vehicle type", format!("unknown vehicle type '{}'", id))
        })?;

        self.draft.selected_vehicle_type = Some(vehicle_type.id.to_string());
        self.draft.selected_year = None;
        self.draft.selected_make = None;
        self.draft.selected_model = None;
        self.draft.search_query.clear();
        self.draft.step = Step::VehicleYmm(YmmSubstep::Year);
        tracing::info!("🚗 Vehicle type selected: {}", vehicle_type.name);
        Ok(())
    }

    /// 目前車種所有年份，去重後由新到舊
    fn all_years(&self) -> Vec<i32> {
        let vehicle_type = self.draft.selected_vehicle_type.as_deref().unwrap_or_default();
        let years: BTreeSet<i32> = catalog::makes_for_type(vehicle_type)
            .iter()
            .flat_map(|m| m.years.iter().copied())
            .collect();
        years.into_iter().rev().collect()
    }

    fn makes_for_selected_year(&self) -> Vec<&'static str> {
        let (Some(vehicle_type), Some(year)) = (
            self.draft.selected_vehicle_type.as_deref(),
            self.draft.selected_year,
        ) else {
            return Vec::new();
        };
        let mut makes: Vec<&'static str> = catalog::makes_for_type(vehicle_type)
            .iter()
            .filter(|m| m.years.contains(&year))
            .map(|m| m.make)
            .collect();
        makes.sort_unstable();
        makes
    }

    fn models_for_selected_make(&self) -> Vec<&'static str> {
        let (Some(vehicle_type), Some(make)) = (
            self.draft.selected_vehicle_type.as_deref(),
            self.draft.selected_make.as_deref(),
        ) else {
            return Vec::new();
        };
        let mut models = catalog::find_make(vehicle_type, make)
            .map(|m| m.models.to_vec())
            .unwrap_or_default();
        models.sort_unstable();
        models
    }

    pub fn available_years(&self) -> Vec<i32> {
        let query = self.draft.search_query.as_str();
        self.all_years()
            .into_iter()
            .filter(|year| year.to_string().contains(query))
            .collect()
    }

    pub fn available_makes(&self) -> Vec<&'static str> {
        let query = self.draft.search_query.to_lowercase();
        self.makes_for_selected_year()
            .into_iter()
            .filter(|make| make.to_lowercase().contains(&query))
            .collect()
    }

    pub fn available_models(&self) -> Vec<&'static str> {
        let query = self.draft.search_query.to_lowercase();
        self.models_for_selected_make()
            .into_iter()
            .filter(|model| model.to_lowercase().contains(&query))
            .collect()
    }

    pub fn select_year(&mut self, year: i32) -> Result<()> {
        self.ensure_step("select year", Step::VehicleYmm(YmmSubstep::Year))?;
        if !self.all_years().contains(&year) {
            return Err(self.reject(
                "select year",
                format!("{} is not offered for this vehicle type", year),
            ));
        }

        self.draft.selected_year = Some(year);
        self.draft.search_query.clear();
        self.draft.step = Step::VehicleYmm(YmmSubstep::Make);
        tracing::debug!("Year selected: {}", year);
        Ok(())
    }

    pub fn select_make(&mut self, make: &str) -> Result<()> {
        self.ensure_step("select make", Step::VehicleYmm(YmmSubstep::Make))?;
        if !self.makes_for_selected_year().iter().any(|m| *m == make) {
            return Err(self.reject(
                "select make",
                format!("{} is not offered for the selected year", make),
            ));
        }

        self.draft.selected_make = Some(make.to_string());
        self.draft.search_query.clear();
        self.draft.step = Step::VehicleYmm(YmmSubstep::Model);
        tracing::debug!("Make selected: {}", make);
        Ok(())
    }

    pub fn select_model(&mut self, model: &str) -> Result<()> {
        self.ensure_step("select model", Step::VehicleYmm(YmmSubstep::Model))?;
        if !self.models_for_selected_make().iter().any(|m| *m == model) {
            return Err(self.reject(
                "select model",
                format!("{} is not a model of the selected make", model),
            ));
        }

        self.draft.selected_model = Some(model.to_string());
        self.draft.search_query.clear();
        self.draft.step = if self.has_addons() {
            Step::Addons
        } else {
            Step::DateTime
        };
        tracing::info!(
            "🚙 Vehicle selected: {}, next step {:?}",
            self.draft.vehicle_description(),
            self.draft.step
        );
        Ok(())
    }

    pub fn set_search_query(&mut self, text: &str) -> Result<()> {
        if self.draft.ymm_substep().is_none() {
            return Err(self.reject("search vehicles", "search is only available while picking a vehicle"));
        }
        self.draft.search_query = text.to_string();
        Ok(())
    }

    pub fn navigate_back(&mut self) -> Result<()> {
        if self.is_submitting() {
            return Err(BookingError::SubmissionInFlight);
        }

        let has_addons = self.has_addons();
        let draft = &mut self.draft;
        let previous = match draft.step {
            Step::Service | Step::Confirmation => None,
            Step::VehicleType => {
                draft.selected_service = None;
                Some(Step::Service)
            }
            Step::VehicleYmm(YmmSubstep::Year) => {
                draft.selected_vehicle_type = None;
                Some(Step::VehicleType)
            }
            Step::VehicleYmm(YmmSubstep::Make) => {
                draft.selected_year = None;
                Some(Step::VehicleYmm(YmmSubstep::Year))
            }
            Step::VehicleYmm(YmmSubstep::Model) => {
                draft.selected_make = None;
                Some(Step::VehicleYmm(YmmSubstep::Make))
            }
            Step::DateTime if has_addons => Some(Step::Addons),
            Step::Addons | Step::DateTime => {
                draft.selected_model = None;
                Some(Step::VehicleYmm(YmmSubstep::Model))
            }
            Step::Contact => Some(Step::DateTime),
        };

        let Some(previous) = previous else {
            let reason = if self.draft.step.is_terminal() {
                "the booking is confirmed"
            } else {
                "already at the first step"
            };
            return Err(self.reject("go back", reason));
        };

        self.draft.search_query.clear();
        tracing::debug!("Back: {:?} -> {:?}", self.draft.step, previous);
        self.draft.step = previous;
        Ok(())
    }

    pub fn toggle_addon(&mut self, name: &str) -> Result<()> {
        self.ensure_step("toggle add-on", Step::Addons)?;
        let addon = catalog::find_addon(name)
            .ok_or_else(|| self.reject("toggle add-on", format!("unknown add-on '{}'", name)))?;

        let selected = &mut self.draft.selected_addons;
        if let Some(idx) = selected.iter().position(|a| a == addon.name) {
            selected.remove(idx);
            tracing::debug!("Add-on removed: {}", addon.name);
        } else {
            selected.push(addon.name.to_string());
            tracing::debug!("Add-on added: {}", addon.name);
        }
        Ok(())
    }

    pub fn confirm_addons(&mut self) -> Result<()> {
        self.ensure_step("continue from add-ons", Step::Addons)?;
        self.draft.step = Step::DateTime;
        tracing::info!(
            "✨ Add-ons confirmed: {}",
            if self.draft.selected_addons.is_empty() {
                "none".to_string()
            } else {
                self.draft.selected_addons.join(", ")
            }
        );
        Ok(())
    }

    pub fn select_date(&mut self, date: NaiveDate) -> Result<()> {
        self.ensure_step("select date", Step::DateTime)?;
        let today = self.clock.today();
        if date < today {
            return Err(self.reject(
                "select date",
                format!("{} is before today ({})", date, today),
            ));
        }

        self.draft.selected_date = Some(date);
        self.draft.selected_time = None;
        tracing::debug!("Date selected: {}", date);
        Ok(())
    }

    pub fn select_time(&mut self, slot: &str) -> Result<()> {
        self.ensure_step("select time", Step::DateTime)?;
        if self.draft.selected_date.is_none() {
            return Err(self.reject("select time", "pick a date first"));
        }
        if !catalog::is_time_slot(slot) {
            return Err(self.reject("select time", format!("'{}' is not an open time slot", slot)));
        }

        self.draft.selected_time = Some(slot.to_string());
        tracing::debug!("Time selected: {}", slot);
        Ok(())
    }

    pub fn proceed_to_contact(&mut self) -> Result<()> {
        self.ensure_step("continue to contact", Step::DateTime)?;
        if self.draft.selected_date.is_none() || self.draft.selected_time.is_none() {
            return Err(self.reject("continue to contact", "pick a date and a time first"));
        }
        self.draft.step = Step::Contact;
        Ok(())
    }

    /// 送出預約。成功才進入確認畫面；失敗時停在聯絡資料步驟並記錄錯誤訊息。
    pub async fn submit_contact(&mut self, contact: ContactInfo) -> Result<()> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::warn!("Ignoring duplicate booking submission while one is pending");
            return Err(BookingError::SubmissionInFlight);
        };

        self.ensure_step("submit contact", Step::Contact)?;
        validate_required_text("name", &contact.name)?;
        validate_required_text("email", &contact.email)?;
        validate_required_text("phone", &contact.phone)?;

        let contact = ContactInfo {
            notes: contact.notes.filter(|n| !n.trim().is_empty()),
            ..contact
        };
        let payload = self.build_payload(&contact);
        self.last_error = None;

        tracing::info!(
            "📨 Submitting booking: {} on {} at {}",
            payload.service,
            payload.date,
            payload.time
        );
        tracing::debug!("Booking payload: {:?}", payload);

        match self.submitter.submit(&payload).await {
            Ok(()) => {
                self.draft.contact = contact;
                self.draft.step = Step::Confirmation;
                tracing::info!("✅ Booking confirmed for {}", self.draft.contact.name);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("❌ Booking submission failed: {}", e);
                self.last_error = Some(e.user_friendly_message());
                Err(e)
            }
        }
    }

    fn build_payload(&self, contact: &ContactInfo) -> BookingPayload {
        let draft = &self.draft;
        BookingPayload {
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            service: draft.selected_service.clone().unwrap_or_default(),
            vehicle_type: draft
                .selected_vehicle_type
                .as_deref()
                .map(vehicle_type_label)
                .unwrap_or_else(|| "Not specified".to_string()),
            vehicle: draft.vehicle_description(),
            date: draft
                .selected_date
                .map(|d| format!("{}/{}/{}", d.month(), d.day(), d.year()))
                .unwrap_or_default(),
            time: draft.selected_time.clone().unwrap_or_default(),
            addons: if draft.selected_addons.is_empty() {
                "None".to_string()
            } else {
                draft.selected_addons.join(", ")
            },
            notes: contact
                .notes
                .clone()
                .unwrap_or_else(|| "No additional notes".to_string()),
        }
    }

    pub fn start_new_booking(&mut self) {
        self.draft = BookingDraft::new(self.clock.today());
        self.last_error = None;
        tracing::info!("🔄 Started a new booking");
    }

    pub fn progress_metadata(&self) -> ProgressMetadata {
        let has_addons = self.has_addons();
        let current_index = match self.draft.step {
            Step::Confirmation => return ProgressMetadata::empty(),
            Step::Service => 0,
            Step::VehicleType => 1,
            Step::VehicleYmm(_) => 2,
            Step::Addons => 3,
            Step::DateTime if has_addons => 4,
            Step::DateTime => 3,
            Step::Contact if has_addons => 5,
            Step::Contact => 4,
        };
        let step_labels = if has_addons {
            LABELS_WITH_ADDONS.to_vec()
        } else {
            LABELS_WITHOUT_ADDONS.to_vec()
        };
        ProgressMetadata {
            step_labels,
            current_index,
        }
    }

    /// 從 1 開始；確認畫面回傳 0
    pub fn current_step_number(&self) -> usize {
        let progress = self.progress_metadata();
        if progress.is_empty() {
            0
        } else {
            progress.current_index + 1
        }
    }

    pub fn total_steps(&self) -> usize {
        if self.has_addons() {
            LABELS_WITH_ADDONS.len()
        } else {
            LABELS_WITHOUT_ADDONS.len()
        }
    }

    pub fn previous_month(&mut self) {
        self.draft.current_month = shift_month(self.draft.current_month, false);
    }

    pub fn next_month(&mut self) {
        self.draft.current_month = shift_month(self.draft.current_month, true);
    }

    pub fn month_view(&self) -> MonthView {
        MonthView::build(
            self.draft.current_month,
            self.clock.today(),
            self.draft.selected_date,
        )
    }
}
