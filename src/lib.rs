pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{
    clock::SystemClock,
    http::{DryRunSubmitter, FormRelaySubmitter, RelaySettings},
    storage::LocalStorage,
};
pub use config::{booking_request::BookingRequest, toml_config::BookingConfig};
pub use core::{
    calendar::{CalendarExporter, CalendarProvider},
    engine::{BookingEngine, BookingReceipt},
    wizard::BookingWizard,
};
pub use domain::model::{BookingDraft, ContactInfo, Step, YmmSubstep};
pub use utils::error::{BookingError, Result};
