use chrono::{FixedOffset, Local, NaiveDateTime, Utc};
use serde::Deserialize;
use thiserror::Error;

/// Configuration options specific to the booking service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// SQLite database path or URL.
    pub database_url: String,
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Policy knobs for slot generation and the "now" used to reject past bookings.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct SchedulingConfig {
    /// Step between candidate slot start times.
    #[serde(default = "default_slot_granularity")]
    pub slot_granularity_minutes: u32,
    /// Fixed salon offset from UTC. Falls back to the host's local zone when unset.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

/// Invalid scheduling settings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchedulingConfigError {
    #[error("utc_offset_minutes must be between -1439 and 1439, got {0}")]
    UtcOffsetOutOfRange(i32),
}

pub const DEFAULT_SLOT_GRANULARITY_MINUTES: u32 = 15;

fn default_slot_granularity() -> u32 {
    DEFAULT_SLOT_GRANULARITY_MINUTES
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            slot_granularity_minutes: DEFAULT_SLOT_GRANULARITY_MINUTES,
            utc_offset_minutes: None,
        }
    }
}

impl SchedulingConfig {
    /// Slot step as a `chrono` span; zero is treated as one minute.
    pub fn slot_step(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.slot_granularity_minutes.max(1)))
    }

    /// Fixed salon offset, if one is configured.
    pub fn utc_offset(&self) -> Result<Option<FixedOffset>, SchedulingConfigError> {
        let Some(minutes) = self.utc_offset_minutes else {
            return Ok(None);
        };
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Some)
            .ok_or(SchedulingConfigError::UtcOffsetOutOfRange(minutes))
    }

    /// Checked once at startup so `now` never meets a bad offset.
    pub fn validate(&self) -> Result<(), SchedulingConfigError> {
        self.utc_offset().map(|_| ())
    }

    /// Current salon wall-clock time, using the host zone without a valid offset.
    pub fn now(&self) -> NaiveDateTime {
        match self.utc_offset() {
            Ok(Some(offset)) => Utc::now().with_timezone(&offset).naive_local(),
            _ => Local::now().naive_local(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_granularity_falls_back_to_one_minute() {
        let config = SchedulingConfig {
            slot_granularity_minutes: 0,
            utc_offset_minutes: None,
        };
        assert_eq!(config.slot_step().num_minutes(), 1);
    }

    #[test]
    fn out_of_range_offsets_are_rejected() {
        for minutes in [1440, -1440, i32::MAX, i32::MIN] {
            let config = SchedulingConfig {
                slot_granularity_minutes: 15,
                utc_offset_minutes: Some(minutes),
            };
            assert_eq!(
                config.validate(),
                Err(SchedulingConfigError::UtcOffsetOutOfRange(minutes))
            );
        }

        let kathmandu = SchedulingConfig {
            slot_granularity_minutes: 15,
            utc_offset_minutes: Some(345),
        };
        assert_eq!(
            kathmandu.utc_offset().unwrap(),
            FixedOffset::east_opt(345 * 60)
        );
        assert!(SchedulingConfig::default().validate().is_ok());
    }

    #[test]
    fn fixed_offset_shifts_now() {
        let utc = SchedulingConfig {
            slot_granularity_minutes: 15,
            utc_offset_minutes: Some(0),
        };
        let ahead = SchedulingConfig {
            slot_granularity_minutes: 15,
            utc_offset_minutes: Some(120),
        };
        let diff = ahead.now() - utc.now();
        assert!((diff.num_minutes() - 120).abs() <= 1);
    }
}
