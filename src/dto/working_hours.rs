use serde::Serialize;

use crate::domain::types::weekday_name;
use crate::domain::working_hour::WorkingHour;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkingHourDto {
    pub id: i32,
    pub day_of_week: &'static str,
    pub open_time: String,
    pub close_time: String,
    pub is_closed: bool,
}

impl From<WorkingHour> for WorkingHourDto {
    fn from(value: WorkingHour) -> Self {
        Self {
            id: value.id.get(),
            day_of_week: weekday_name(value.day_of_week),
            open_time: value.open_time.to_string(),
            close_time: value.close_time.to_string(),
            is_closed: value.is_closed,
        }
    }
}
