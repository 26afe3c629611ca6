use chrono::{DateTime, Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// 年份／廠牌／車型子步驟
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YmmSubstep {
    Year,
    Make,
    Model,
}

/// 預約精靈目前所在的步驟
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    Service,
    VehicleType,
    VehicleYmm(YmmSubstep),
    Addons,
    DateTime,
    Contact,
    Confirmation,
}

impl Step {
    pub fn is_terminal(self) -> bool {
        matches!(self, Step::Confirmation)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl ContactInfo {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            notes,
        }
    }
}

/// 單一預約工作階段的所有選擇。只有 `BookingWizard` 會修改它。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub step: Step,
    pub selected_service: Option<String>,
    pub selected_vehicle_type: Option<String>,
    pub selected_year: Option<i32>,
    pub selected_make: Option<String>,
    pub selected_model: Option<String>,
    /// 依加入順序保存，但不會重複
    pub selected_addons: Vec<String>,
    pub selected_date: Option<NaiveDate>,
    pub selected_time: Option<String>,
    pub contact: ContactInfo,
    pub search_query: String,
    /// 月曆顯示游標，永遠是該月的 1 號
    pub current_month: NaiveDate,
}

impl BookingDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step: Step::Service,
            selected_service: None,
            selected_vehicle_type: None,
            selected_year: None,
            selected_make: None,
            selected_model: None,
            selected_addons: Vec::new(),
            selected_date: None,
            selected_time: None,
            contact: ContactInfo::default(),
            search_query: String::new(),
            current_month: today.with_day(1).unwrap_or(today),
        }
    }

    pub fn ymm_substep(&self) -> Option<YmmSubstep> {
        match self.step {
            Step::VehicleYmm(substep) => Some(substep),
            _ => None,
        }
    }

    /// "2021 Toyota Camry"；缺少的部分會被略過
    pub fn vehicle_description(&self) -> String {
        let year = self.selected_year.map(|y| y.to_string());
        [
            year.as_deref(),
            self.selected_make.as_deref(),
            self.selected_model.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressMetadata {
    pub step_labels: Vec<&'static str>,
    pub current_index: usize,
}

impl ProgressMetadata {
    pub fn empty() -> Self {
        Self {
            step_labels: Vec::new(),
            current_index: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.step_labels.is_empty()
    }
}

/// 從確認後的預約導出的行事曆事件，每次匯出時重新計算
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

/// 送往表單轉發服務的預約內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: String,
    pub vehicle_type: String,
    pub vehicle: String,
    pub date: String,
    pub time: String,
    pub addons: String,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformInfo {
    pub is_ios: bool,
    pub is_android: bool,
    pub is_mobile: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_starts_at_service_with_month_cursor() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let draft = BookingDraft::new(today);

        assert_eq!(draft.step, Step::Service);
        assert_eq!(draft.ymm_substep(), None);
        assert_eq!(
            draft.current_month,
            NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()
        );
        assert!(draft.selected_addons.is_empty());
    }

    #[test]
    fn test_vehicle_description_skips_missing_parts() {
        let mut draft = BookingDraft::new(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(draft.vehicle_description(), "");

        draft.selected_year = Some(2021);
        draft.selected_make = Some("Toyota".to_string());
        assert_eq!(draft.vehicle_description(), "2021 Toyota");

        draft.selected_model = Some("Camry".to_string());
        assert_eq!(draft.vehicle_description(), "2021 Toyota Camry");
    }
}
