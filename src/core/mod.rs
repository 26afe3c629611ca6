pub mod calendar;
pub mod engine;
pub mod month_view;
pub mod wizard;

pub use crate::domain::ports::{BookingSubmitter, Clock, ConfigProvider, Storage};
pub use crate::utils::error::Result;
