use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub is_past: bool,
    pub is_selected: bool,
}

/// 日期步驟的月曆格子
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    /// 1 號之前的空格數（週日 = 0）
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

impl MonthView {
    pub fn build(month_start: NaiveDate, today: NaiveDate, selected: Option<NaiveDate>) -> Self {
        let first = month_start.with_day(1).unwrap_or(month_start);
        let next_month = first + Months::new(1);

        let days = first
            .iter_days()
            .take_while(|date| *date < next_month)
            .map(|date| DayCell {
                day: date.day(),
                date,
                is_past: date < today,
                is_selected: selected == Some(date),
            })
            .collect();

        Self {
            year: first.year(),
            month: first.month(),
            month_name: MONTH_NAMES[first.month0() as usize],
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        }
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.month_name, self.year)
    }
}

pub fn shift_month(month_start: NaiveDate, forward: bool) -> NaiveDate {
    let first = month_start.with_day(1).unwrap_or(month_start);
    let shifted = if forward {
        first.checked_add_months(Months::new(1))
    } else {
        first.checked_sub_months(Months::new(1))
    };
    shifted.unwrap_or(first)
}
