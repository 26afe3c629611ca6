use crate::domain::model::{BookingDraft, CalendarEvent, PlatformInfo};
use crate::utils::error::{BookingError, Result};
use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone, Timelike, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// 與瀏覽器 encodeURIComponent 相同的保留字元
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const APPOINTMENT_LENGTH_HOURS: i64 = 1;

static IOS_AGENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"iphone|ipad|ipod").expect("static pattern compiles"));
static ANDROID_AGENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"android").expect("static pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarProvider {
    Google,
    Outlook,
    Office365,
    Yahoo,
    ICloud,
}

impl CalendarProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            CalendarProvider::Google => "google",
            CalendarProvider::Outlook => "outlook",
            CalendarProvider::Office365 => "office365",
            CalendarProvider::Yahoo => "yahoo",
            CalendarProvider::ICloud => "icloud",
        }
    }
}

impl fmt::Display for CalendarProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarProvider {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "google" => Ok(CalendarProvider::Google),
            "outlook" => Ok(CalendarProvider::Outlook),
            "office365" => Ok(CalendarProvider::Office365),
            "yahoo" => Ok(CalendarProvider::Yahoo),
            "icloud" => Ok(CalendarProvider::ICloud),
            other => Err(BookingError::InvalidFieldValue {
                field: "calendar provider".to_string(),
                value: other.to_string(),
                reason: "Unknown calendar provider".to_string(),
            }),
        }
    }
}

/// 確認頁上「加入行事曆」要做的事
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportAction {
    OpenUrl(String),
    DownloadIcs(IcsFile),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcsFile {
    pub filename: String,
    pub contents: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarTarget {
    AppleNative,
    Provider(CalendarProvider),
    IcsFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarOption {
    pub name: &'static str,
    pub description: &'static str,
    pub target: CalendarTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSettings {
    pub location: String,
    pub prodid: String,
    pub uid_domain: String,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            location: "Business Location".to_string(),
            prodid: "-//Booking App//EN".to_string(),
            uid_domain: "bookingapp.com".to_string(),
        }
    }
}

/// 把 "2:30 PM" 轉成 24 小時制的時間
pub fn parse_time_slot(slot: &str) -> Result<NaiveTime> {
    let invalid = |reason: &str| BookingError::InvalidFieldValue {
        field: "time".to_string(),
        value: slot.to_string(),
        reason: reason.to_string(),
    };

    let (clock, period) = slot
        .trim()
        .split_once(' ')
        .ok_or_else(|| invalid("expected 'H:MM AM' or 'H:MM PM'"))?;
    let (hours, minutes) = clock
        .split_once(':')
        .ok_or_else(|| invalid("missing ':' between hour and minute"))?;
    let hours: u32 = hours.parse().map_err(|_| invalid("hour is not a number"))?;
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| invalid("minute is not a number"))?;

    if !(1..=12).contains(&hours) {
        return Err(invalid("hour must be between 1 and 12"));
    }

    let hour24 = match period {
        "AM" if hours == 12 => 0,
        "AM" => hours,
        "PM" if hours == 12 => 12,
        "PM" => hours + 12,
        _ => return Err(invalid("period must be AM or PM")),
    };

    NaiveTime::from_hms_opt(hour24, minutes, 0).ok_or_else(|| invalid("minute out of range"))
}

pub fn format_time_slot(time: NaiveTime) -> String {
    let (is_pm, hour12) = time.hour12();
    format!(
        "{}:{:02} {}",
        hour12,
        time.minute(),
        if is_pm { "PM" } else { "AM" }
    )
}

/// "pickupTruck" -> "PICKUP TRUCK"
pub fn vehicle_type_label(vehicle_type: &str) -> String {
    let mut spaced = String::with_capacity(vehicle_type.len() + 4);
    for ch in vehicle_type.chars() {
        if ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(ch);
    }
    spaced.trim().to_uppercase()
}

pub fn ics_filename(service: &str) -> String {
    let slug = service
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    format!("appointment-{}.ics", slug)
}

pub fn detect_platform(user_agent: &str) -> PlatformInfo {
    let agent = user_agent.to_lowercase();
    let is_ios = IOS_AGENT.is_match(&agent);
    let is_android = ANDROID_AGENT.is_match(&agent);
    PlatformInfo {
        is_ios,
        is_android,
        is_mobile: is_ios || is_android,
    }
}

/// 各平台提供的行事曆選項
pub fn calendar_options(platform: PlatformInfo) -> Vec<CalendarOption> {
    let mut options = Vec::new();
    if platform.is_ios || !platform.is_mobile {
        options.push(CalendarOption {
            name: "Apple Calendar",
            description: if platform.is_ios {
                "Opens in Calendar app"
            } else {
                "Opens in browser"
            },
            target: CalendarTarget::AppleNative,
        });
    }
    options.extend([
        CalendarOption {
            name: "Google Calendar",
            description: "Opens in browser",
            target: CalendarTarget::Provider(CalendarProvider::Google),
        },
        CalendarOption {
            name: "Outlook Calendar",
            description: "Opens in browser",
            target: CalendarTarget::Provider(CalendarProvider::Outlook),
        },
        CalendarOption {
            name: "Office 365",
            description: "Opens in browser",
            target: CalendarTarget::Provider(CalendarProvider::Office365),
        },
    ]);
    if !platform.is_mobile {
        options.push(CalendarOption {
            name: "Yahoo Calendar",
            description: "Opens in browser",
            target: CalendarTarget::Provider(CalendarProvider::Yahoo),
        });
        options.push(CalendarOption {
            name: "Other (.ics)",
            description: "Downloads .ics file",
            target: CalendarTarget::IcsFile,
        });
    }
    options
}

fn encode(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

fn escape_text(text: &str) -> String {
    text.replace("\r\n", "\\n")
        .replace(['\r', '\n'], "\\n")
}

fn utc_basic(instant: &DateTime<Local>) -> String {
    instant
        .with_timezone(&Utc)
        .format("%Y%m%dT%H%M%SZ")
        .to_string()
}

fn utc_iso(instant: &DateTime<Local>) -> String {
    instant
        .with_timezone(&Utc)
        .format("%Y-%m-%dT%H:%M:%S%.3fZ")
        .to_string()
}

#[derive(Debug, Clone, Default)]
pub struct CalendarExporter {
    settings: CalendarSettings,
}

impl CalendarExporter {
    pub fn new(settings: CalendarSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CalendarSettings {
        &self.settings
    }

    pub fn build_event(&self, draft: &BookingDraft) -> Result<CalendarEvent> {
        let service = draft
            .selected_service
            .as_deref()
            .ok_or_else(|| BookingError::ExportError {
                message: "no service selected".to_string(),
            })?;
        let date = draft.selected_date.ok_or_else(|| BookingError::ExportError {
            message: "no date selected".to_string(),
        })?;
        let slot = draft
            .selected_time
            .as_deref()
            .ok_or_else(|| BookingError::ExportError {
                message: "no time selected".to_string(),
            })?;

        let wall_clock = date.and_time(parse_time_slot(slot)?);
        let start = Local
            .from_local_datetime(&wall_clock)
            .earliest()
            .ok_or_else(|| BookingError::ExportError {
                message: format!("{} does not exist in the local time zone", wall_clock),
            })?;
        let end = start + Duration::hours(APPOINTMENT_LENGTH_HOURS);

        let mut lines = vec![format!("Service: {}", service)];
        if let Some(vehicle_type) = draft.selected_vehicle_type.as_deref() {
            lines.push(format!("Vehicle Type: {}", vehicle_type_label(vehicle_type)));
        }
        let vehicle = draft.vehicle_description();
        if !vehicle.is_empty() {
            lines.push(format!("Vehicle: {}", vehicle));
        }
        if !draft.selected_addons.is_empty() {
            lines.push(format!("Add-ons: {}", draft.selected_addons.join(", ")));
        }
        lines.push(format!("Booked by: {}", draft.contact.name));
        lines.push(format!("Phone: {}", draft.contact.phone));
        lines.push(format!("Email: {}", draft.contact.email));

        Ok(CalendarEvent {
            title: format!("{} Appointment", service),
            description: lines.join("\n"),
            location: self.settings.location.clone(),
            start,
            end,
        })
    }

    pub fn to_ics(&self, event: &CalendarEvent) -> String {
        self.to_ics_at(event, Utc::now())
    }

    /// 以指定的產生時間輸出 RFC 5545 文件；UID 由產生時間導出
    pub fn to_ics_at(&self, event: &CalendarEvent, generated_at: DateTime<Utc>) -> String {
        let lines = [
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{}", self.settings.prodid),
            "CALSCALE:GREGORIAN".to_string(),
            "METHOD:PUBLISH".to_string(),
            "BEGIN:VEVENT".to_string(),
            format!(
                "UID:{}@{}",
                generated_at.timestamp_millis(),
                self.settings.uid_domain
            ),
            format!("DTSTAMP:{}", generated_at.format("%Y%m%dT%H%M%SZ")),
            format!("DTSTART:{}", utc_basic(&event.start)),
            format!("DTEND:{}", utc_basic(&event.end)),
            format!("SUMMARY:{}", escape_text(&event.title)),
            format!("DESCRIPTION:{}", escape_text(&event.description)),
            format!("LOCATION:{}", escape_text(&event.location)),
            "STATUS:CONFIRMED".to_string(),
            "SEQUENCE:0".to_string(),
            "END:VEVENT".to_string(),
            "END:VCALENDAR".to_string(),
        ];
        let mut document = lines.join("\r\n");
        document.push_str("\r\n");
        document
    }

    /// 未知的 provider 回傳空字串
    pub fn to_provider_url(&self, provider: &str, event: &CalendarEvent) -> String {
        match provider.parse::<CalendarProvider>() {
            Ok(provider) => self.provider_url(provider, event),
            Err(_) => {
                tracing::debug!("Unknown calendar provider '{}', no link generated", provider);
                String::new()
            }
        }
    }

    pub fn provider_url(&self, provider: CalendarProvider, event: &CalendarEvent) -> String {
        let title = encode(&event.title);
        let description = encode(&event.description);
        let location = encode(&event.location);

        match provider {
            CalendarProvider::Google => format!(
                "https://calendar.google.com/calendar/render?action=TEMPLATE&text={}&details={}&location={}&dates={}/{}",
                title,
                description,
                location,
                utc_basic(&event.start),
                utc_basic(&event.end)
            ),
            CalendarProvider::Outlook => format!(
                "https://outlook.live.com/calendar/0/action/compose?subject={}&body={}&location={}&startdt={}&enddt={}",
                title,
                description,
                location,
                utc_iso(&event.start),
                utc_iso(&event.end)
            ),
            CalendarProvider::Office365 => format!(
                "https://outlook.office.com/calendar/0/action/compose?subject={}&body={}&location={}&startdt={}&enddt={}",
                title,
                description,
                location,
                utc_iso(&event.start),
                utc_iso(&event.end)
            ),
            CalendarProvider::Yahoo => format!(
                "https://calendar.yahoo.com/?v=60&title={}&desc={}&in_loc={}&st={}&et={}",
                title,
                description,
                location,
                utc_basic(&event.start),
                utc_basic(&event.end)
            ),
            CalendarProvider::ICloud => format!(
                "https://www.icloud.com/calendar?title={}&description={}&location={}&startdt={}&enddt={}",
                title,
                description,
                location,
                utc_iso(&event.start),
                utc_iso(&event.end)
            ),
        }
    }

    pub fn ics_file(&self, draft: &BookingDraft) -> Result<IcsFile> {
        let event = self.build_event(draft)?;
        let service = draft.selected_service.as_deref().unwrap_or("booking");
        Ok(IcsFile {
            filename: ics_filename(service),
            contents: self.to_ics(&event),
        })
    }

    /// iOS 直接交給行事曆 App；其他平台開 iCloud 網頁
    pub fn apple_calendar_action(
        &self,
        platform: PlatformInfo,
        event: &CalendarEvent,
    ) -> ExportAction {
        if platform.is_ios {
            let ics = self.to_ics(event);
            ExportAction::OpenUrl(format!(
                "data:text/calendar;charset=utf-8,{}",
                encode(&ics)
            ))
        } else {
            ExportAction::OpenUrl(self.provider_url(CalendarProvider::ICloud, event))
        }
    }

    pub fn export_action(
        &self,
        target: CalendarTarget,
        platform: PlatformInfo,
        draft: &BookingDraft,
    ) -> Result<ExportAction> {
        let event = self.build_event(draft)?;
        let action = match target {
            CalendarTarget::AppleNative => self.apple_calendar_action(platform, &event),
            CalendarTarget::Provider(provider) => {
                ExportAction::OpenUrl(self.provider_url(provider, &event))
            }
            CalendarTarget::IcsFile => ExportAction::DownloadIcs(self.ics_file(draft)?),
        };
        tracing::debug!("Calendar export action for {:?}: {:?}", target, action);
        Ok(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::TIME_SLOTS;
    use crate::domain::model::{ContactInfo, Step};
    use chrono::{NaiveDate, Timelike};

    fn confirmed_draft() -> BookingDraft {
        let mut draft = BookingDraft::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        draft.step = Step::Confirmation;
        draft.selected_service = Some("Basic Interior Detailing".to_string());
        draft.selected_vehicle_type = Some("car".to_string());
        draft.selected_year = Some(2021);
        draft.selected_make = Some("Toyota".to_string());
        draft.selected_model = Some("Camry".to_string());
        draft.selected_addons = vec!["Aromatherapy".to_string(), "Premium Products".to_string()];
        draft.selected_date = NaiveDate::from_ymd_opt(2026, 10, 26);
        draft.selected_time = Some("2:30 PM".to_string());
        draft.contact = ContactInfo::new("Jane Doe", "jane@example.com", "(555) 123-4567", None);
        draft
    }

    #[test]
    fn test_parse_time_slot_conversions() {
        assert_eq!(
            parse_time_slot("12:00 PM").unwrap(),
            NaiveTime::from_hms_opt(12, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time_slot("12:30 AM").unwrap(),
            NaiveTime::from_hms_opt(0, 30, 0).unwrap()
        );
        assert_eq!(
            parse_time_slot("9:00 AM").unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time_slot("2:30 PM").unwrap(),
            NaiveTime::from_hms_opt(14, 30, 0).unwrap()
        );
        assert!(parse_time_slot("14:30").is_err());
        assert!(parse_time_slot("13:00 PM").is_err());
        assert!(parse_time_slot("9:00 XM").is_err());
    }

    #[test]
    fn test_time_slot_round_trip() {
        for slot in TIME_SLOTS {
            let parsed = parse_time_slot(slot).unwrap();
            assert_eq!(format_time_slot(parsed), *slot);
        }
    }

    #[test]
    fn test_vehicle_type_label() {
        assert_eq!(vehicle_type_label("car"), "CAR");
        assert_eq!(vehicle_type_label("suv"), "SUV");
        assert_eq!(vehicle_type_label("pickupTruck"), "PICKUP TRUCK");
    }

    #[test]
    fn test_ics_filename() {
        assert_eq!(
            ics_filename("Basic Interior Detailing"),
            "appointment-basic-interior-detailing.ics"
        );
        assert_eq!(
            ics_filename("Premium In & Out Detailing"),
            "appointment-premium-in-&-out-detailing.ics"
        );
    }

    #[test]
    fn test_build_event_description_lines() {
        let exporter = CalendarExporter::default();
        let event = exporter.build_event(&confirmed_draft()).unwrap();

        assert_eq!(event.title, "Basic Interior Detailing Appointment");
        assert_eq!(event.location, "Business Location");
        assert_eq!(
            event.description,
            "Service: Basic Interior Detailing\n\
             Vehicle Type: CAR\n\
             Vehicle: 2021 Toyota Camry\n\
             Add-ons: Aromatherapy, Premium Products\n\
             Booked by: Jane Doe\n\
             Phone: (555) 123-4567\n\
             Email: jane@example.com"
        );
        assert_eq!(event.start.hour(), 14);
        assert_eq!(event.start.minute(), 30);
        assert_eq!(event.end - event.start, Duration::hours(1));
    }

    #[test]
    fn test_build_event_omits_empty_sections() {
        let mut draft = confirmed_draft();
        draft.selected_vehicle_type = None;
        draft.selected_year = None;
        draft.selected_make = None;
        draft.selected_model = None;
        draft.selected_addons.clear();

        let event = CalendarExporter::default().build_event(&draft).unwrap();
        assert!(!event.description.contains("Vehicle"));
        assert!(!event.description.contains("Add-ons"));
    }

    #[test]
    fn test_build_event_requires_date_and_time() {
        let mut draft = confirmed_draft();
        draft.selected_time = None;
        assert!(matches!(
            CalendarExporter::default().build_event(&draft),
            Err(BookingError::ExportError { .. })
        ));
    }

    #[test]
    fn test_ics_document_shape() {
        let exporter = CalendarExporter::default();
        let event = exporter.build_event(&confirmed_draft()).unwrap();
        let generated_at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 0).unwrap();
        let ics = exporter.to_ics_at(&event, generated_at);

        let lines: Vec<&str> = ics.lines().collect();
        assert_eq!(lines.first(), Some(&"BEGIN:VCALENDAR"));
        assert_eq!(lines.last(), Some(&"END:VCALENDAR"));
        assert_eq!(lines.iter().filter(|l| **l == "BEGIN:VEVENT").count(), 1);
        assert_eq!(lines.iter().filter(|l| **l == "END:VEVENT").count(), 1);
        assert!(lines.contains(&"VERSION:2.0"));
        assert!(lines.contains(&"PRODID:-//Booking App//EN"));
        assert!(lines.contains(&"STATUS:CONFIRMED"));
        assert!(lines.contains(&"DTSTAMP:20261019T081500Z"));
        assert!(lines.contains(&"UID:1792397700000@bookingapp.com"));
        assert!(lines.contains(&"LOCATION:Business Location"));
        assert!(ics.contains("DESCRIPTION:Service: Basic Interior Detailing\\nVehicle Type: CAR"));
        assert!(ics.contains("\r\n"));

        let expected_start = format!("DTSTART:{}", utc_basic(&event.start));
        let expected_end = format!("DTEND:{}", utc_basic(&event.end));
        assert!(lines.contains(&expected_start.as_str()));
        assert!(lines.contains(&expected_end.as_str()));
    }

    #[test]
    fn test_ics_has_no_bare_carriage_returns() {
        let mut draft = confirmed_draft();
        draft.contact.name = "Jane\rDoe".to_string();
        draft.contact.phone = "555\r\n0100".to_string();

        let exporter = CalendarExporter::default();
        let event = exporter.build_event(&draft).unwrap();
        let ics = exporter.to_ics(&event);

        assert!(ics.contains("Booked by: Jane\\nDoe"));
        assert!(ics.contains("Phone: 555\\n0100"));
        assert!(ics
            .split("\r\n")
            .all(|line| !line.contains('\r') && !line.contains('\n')));
    }

    #[test]
    fn test_google_url_dates() {
        let exporter = CalendarExporter::default();
        let event = exporter.build_event(&confirmed_draft()).unwrap();
        let url = exporter.to_provider_url("google", &event);

        let dates = url.split("dates=").nth(1).unwrap();
        let (start, end) = dates.split_once('/').unwrap();
        assert_eq!(start, utc_basic(&event.start));
        assert_eq!(end, utc_basic(&event.end));
        assert_eq!(start.len(), 16);
        assert!(start.ends_with('Z'));
        assert!(url.contains("text=Basic%20Interior%20Detailing%20Appointment"));
        assert!(url.contains("location=Business%20Location"));
        assert!(url.contains("%0AVehicle%20Type%3A%20CAR"));
    }

    #[test]
    fn test_outlook_family_uses_iso_instants() {
        let exporter = CalendarExporter::default();
        let event = exporter.build_event(&confirmed_draft()).unwrap();

        for provider in ["outlook", "office365", "icloud"] {
            let url = exporter.to_provider_url(provider, &event);
            assert!(url.contains(&format!("startdt={}", utc_iso(&event.start))));
            assert!(url.contains(&format!("enddt={}", utc_iso(&event.end))));
            assert!(url.contains(".000Z"));
        }
        assert!(exporter
            .to_provider_url("office365", &event)
            .starts_with("https://outlook.office.com/"));
        assert!(exporter
            .to_provider_url("yahoo", &event)
            .contains(&format!("st={}&et={}", utc_basic(&event.start), utc_basic(&event.end))));
    }

    #[test]
    fn test_unknown_provider_yields_empty_string() {
        let exporter = CalendarExporter::default();
        let event = exporter.build_event(&confirmed_draft()).unwrap();
        assert_eq!(exporter.to_provider_url("myspace", &event), "");
        assert_eq!(exporter.to_provider_url("Google", &event), "");
    }

    #[test]
    fn test_detect_platform() {
        let iphone = detect_platform(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15",
        );
        assert!(iphone.is_ios && iphone.is_mobile && !iphone.is_android);

        let android = detect_platform("Mozilla/5.0 (Linux; Android 14; Pixel 8)");
        assert!(android.is_android && android.is_mobile && !android.is_ios);

        let desktop = detect_platform("Mozilla/5.0 (Windows NT 10.0; Win64; x64)");
        assert_eq!(desktop, PlatformInfo::default());
    }

    #[test]
    fn test_apple_calendar_action_by_platform() {
        let exporter = CalendarExporter::default();
        let event = exporter.build_event(&confirmed_draft()).unwrap();

        let ios = PlatformInfo {
            is_ios: true,
            is_android: false,
            is_mobile: true,
        };
        match exporter.apple_calendar_action(ios, &event) {
            ExportAction::OpenUrl(url) => {
                assert!(url.starts_with("data:text/calendar;charset=utf-8,BEGIN%3AVCALENDAR"))
            }
            other => panic!("unexpected action {:?}", other),
        }

        match exporter.apple_calendar_action(PlatformInfo::default(), &event) {
            ExportAction::OpenUrl(url) => assert!(url.starts_with("https://www.icloud.com/calendar?")),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[test]
    fn test_calendar_options_per_platform() {
        let android = detect_platform("Android");
        let names: Vec<_> = calendar_options(android).iter().map(|o| o.name).collect();
        assert_eq!(names, vec!["Google Calendar", "Outlook Calendar", "Office 365"]);

        let ios = calendar_options(detect_platform("iPad"));
        assert_eq!(ios[0].target, CalendarTarget::AppleNative);
        assert_eq!(ios[0].description, "Opens in Calendar app");

        let desktop = calendar_options(PlatformInfo::default());
        assert_eq!(desktop.len(), 6);
        assert_eq!(desktop.last().unwrap().target, CalendarTarget::IcsFile);
    }

    #[test]
    fn test_export_action_downloads_named_ics() {
        let exporter = CalendarExporter::default();
        let action = exporter
            .export_action(CalendarTarget::IcsFile, PlatformInfo::default(), &confirmed_draft())
            .unwrap();
        match action {
            ExportAction::DownloadIcs(file) => {
                assert_eq!(file.filename, "appointment-basic-interior-detailing.ics");
                assert!(file.contents.starts_with("BEGIN:VCALENDAR"));
            }
            other => panic!("unexpected action {:?}", other),
        }
    }
}
