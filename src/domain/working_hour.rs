use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::domain::types::{TypeConstraintError, WorkingHourId};

/// Opening window of the salon for one weekday.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkingHour {
    pub id: WorkingHourId,
    pub day_of_week: Weekday,
    pub open_time: NaiveTime,
    pub close_time: NaiveTime,
    pub is_closed: bool,
}

impl WorkingHour {
    /// Builds a record, rejecting open days whose window is empty or inverted.
    pub fn new(
        id: WorkingHourId,
        day_of_week: Weekday,
        open_time: NaiveTime,
        close_time: NaiveTime,
        is_closed: bool,
    ) -> Result<Self, TypeConstraintError> {
        ensure_opening_window(open_time, close_time, is_closed)?;
        Ok(Self {
            id,
            day_of_week,
            open_time,
            close_time,
            is_closed,
        })
    }
}

/// Changes requested for an existing [`WorkingHour`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingHourUpdate {
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
    pub is_closed: Option<bool>,
}

impl WorkingHourUpdate {
    /// Applies the update on top of `current`, validating the resulting window.
    pub fn apply(&self, current: &WorkingHour) -> Result<WorkingHour, TypeConstraintError> {
        WorkingHour::new(
            current.id,
            current.day_of_week,
            self.open_time.unwrap_or(current.open_time),
            self.close_time.unwrap_or(current.close_time),
            self.is_closed.unwrap_or(current.is_closed),
        )
    }
}

pub(crate) fn ensure_opening_window(
    open_time: NaiveTime,
    close_time: NaiveTime,
    is_closed: bool,
) -> Result<(), TypeConstraintError> {
    if !is_closed && open_time >= close_time {
        return Err(TypeConstraintError::InvalidOpeningWindow);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn open_day_requires_ordered_window() {
        let id = WorkingHourId::new(1).unwrap();
        assert!(WorkingHour::new(id, Weekday::Mon, time(9, 0), time(18, 0), false).is_ok());
        assert_eq!(
            WorkingHour::new(id, Weekday::Mon, time(18, 0), time(9, 0), false).unwrap_err(),
            TypeConstraintError::InvalidOpeningWindow
        );
    }

    #[test]
    fn closed_day_ignores_window() {
        let id = WorkingHourId::new(7).unwrap();
        assert!(WorkingHour::new(id, Weekday::Sun, time(0, 0), time(0, 0), true).is_ok());
    }

    #[test]
    fn update_validates_merged_window() {
        let current = WorkingHour::new(
            WorkingHourId::new(1).unwrap(),
            Weekday::Tue,
            time(9, 0),
            time(18, 0),
            false,
        )
        .unwrap();

        let update = WorkingHourUpdate {
            open_time: Some(time(19, 0)),
            ..Default::default()
        };
        assert!(update.apply(&current).is_err());

        let update = WorkingHourUpdate {
            close_time: Some(time(20, 30)),
            ..Default::default()
        };
        assert_eq!(update.apply(&current).unwrap().close_time, time(20, 30));
    }
}
