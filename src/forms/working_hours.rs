use serde::Deserialize;
use thiserror::Error;

use crate::domain::working_hour::WorkingHourUpdate;
use crate::forms::parse_time;

#[derive(Deserialize, Default)]
pub struct UpdateWorkingHourForm {
    pub open_time: Option<String>,
    pub close_time: Option<String>,
    pub is_closed: Option<bool>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateWorkingHourFormError {
    #[error("Invalid time format. Use HH:MM")]
    InvalidTime,
}

impl TryFrom<UpdateWorkingHourForm> for WorkingHourUpdate {
    type Error = UpdateWorkingHourFormError;

    fn try_from(value: UpdateWorkingHourForm) -> Result<Self, Self::Error> {
        let parse = |raw: Option<String>| {
            raw.map(|t| parse_time(&t).ok_or(UpdateWorkingHourFormError::InvalidTime))
                .transpose()
        };

        Ok(Self {
            open_time: parse(value.open_time)?,
            close_time: parse(value.close_time)?,
            is_closed: value.is_closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn parses_supplied_times() {
        let update = WorkingHourUpdate::try_from(UpdateWorkingHourForm {
            open_time: Some("08:30".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(update.open_time, NaiveTime::from_hms_opt(8, 30, 0));
        assert_eq!(update.close_time, None);
    }

    #[test]
    fn rejects_malformed_time() {
        let err = WorkingHourUpdate::try_from(UpdateWorkingHourForm {
            close_time: Some("6pm".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Invalid time format. Use HH:MM");
    }
}
