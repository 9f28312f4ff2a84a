use chrono::NaiveTime;
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, parse_weekday_name};
use crate::domain::working_hour::WorkingHour as DomainWorkingHour;

/// Diesel model representing the `working_hours` table.
///
/// Weekdays are persisted by English name; conversion to [`chrono::Weekday`]
/// happens here so nothing above the persistence layer compares strings.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::working_hours)]
pub struct WorkingHour {
    pub id: i32,
    pub day_of_week: String,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub is_closed: bool,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::working_hours)]
pub struct WorkingHourChangeset {
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub is_closed: bool,
}

impl TryFrom<WorkingHour> for DomainWorkingHour {
    type Error = TypeConstraintError;

    fn try_from(row: WorkingHour) -> Result<Self, Self::Error> {
        DomainWorkingHour::new(
            row.id.try_into()?,
            parse_weekday_name(&row.day_of_week)?,
            row.open_time,
            row.close_time,
            row.is_closed,
        )
    }
}

impl From<&DomainWorkingHour> for WorkingHourChangeset {
    fn from(hours: &DomainWorkingHour) -> Self {
        Self {
            open_time: hours.open_time,
            close_time: hours.close_time,
            is_closed: hours.is_closed,
        }
    }
}
