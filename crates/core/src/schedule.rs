//! Processing schedules: dates, times, durations and UUIDs in payloads.

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{FieldError, ValidationResult};
use crate::validate::{Rules, Validate};

#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
pub struct ScheduleRequest {
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    /// Delay before processing starts, in seconds.
    pub process_after: f64,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "14:23:55")]
    pub repeat_at: Option<NaiveTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Schedule {
    pub item_id: Uuid,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: DateTime<Utc>,
    pub process_after: f64,
    #[schema(value_type = Option<String>, example = "14:23:55")]
    pub repeat_at: Option<NaiveTime>,
    pub start_process: DateTime<Utc>,
    /// Seconds between `start_process` and `end_datetime`.
    pub duration: f64,
}

impl Validate for ScheduleRequest {
    fn validate(&self) -> ValidationResult<()> {
        let mut rules = Rules::new();
        rules.ge("process_after", self.process_after, 0.0);
        rules.check(
            self.end_datetime >= self.start_datetime,
            "end_datetime",
            "value_error",
            "Value error, end_datetime must not be before start_datetime",
            self.end_datetime,
        );
        rules.finish()
    }
}

impl ScheduleRequest {
    /// Fails when `start_datetime + process_after` is past the latest
    /// representable date.
    pub fn plan(self, item_id: Uuid) -> ValidationResult<Schedule> {
        let start_process = delay(self.process_after)
            .and_then(|d| self.start_datetime.checked_add_signed(d))
            .ok_or_else(|| {
                FieldError::new(
                    "value_error",
                    "process_after",
                    "Value error, process_after moves the start out of the supported date range",
                )
                .with_input(self.process_after)
            })?;
        let remaining = self.end_datetime - start_process;
        let duration = match remaining.num_microseconds() {
            Some(us) => us as f64 / 1_000_000.0,
            None => remaining.num_milliseconds() as f64 / 1_000.0,
        };

        Ok(Schedule {
            item_id,
            start_datetime: self.start_datetime,
            end_datetime: self.end_datetime,
            process_after: self.process_after,
            repeat_at: self.repeat_at,
            start_process,
            duration,
        })
    }
}

fn delay(seconds: f64) -> Option<TimeDelta> {
    let micros = (seconds * 1_000_000.0).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(TimeDelta::microseconds(micros as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(process_after: f64) -> ScheduleRequest {
        serde_json::from_value(serde_json::json!({
            "start_datetime": "2026-01-01T10:00:00Z",
            "end_datetime": "2026-01-01T12:00:00Z",
            "process_after": process_after,
            "repeat_at": "14:23:55",
        }))
        .unwrap()
    }

    #[test]
    fn plan_offsets_start_and_measures_remaining() {
        let id = Uuid::now_v7();
        let plan = request(1800.0).plan(id).unwrap();

        assert_eq!(plan.item_id, id);
        assert_eq!(plan.start_process.to_rfc3339(), "2026-01-01T10:30:00+00:00");
        assert_eq!(plan.duration, 5400.0);
        assert_eq!(plan.repeat_at, NaiveTime::from_hms_opt(14, 23, 55));
    }

    #[test]
    fn sub_millisecond_delays_are_kept() {
        let plan = request(0.0005).plan(Uuid::now_v7()).unwrap();
        assert_eq!(plan.duration, 7199.9995);
    }

    #[test]
    fn delay_past_the_calendar_is_a_value_error() {
        let err = request(1e13).plan(Uuid::now_v7()).unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.errors()[0].kind, "value_error");
        assert_eq!(
            serde_json::to_value(&err.errors()[0].loc).unwrap(),
            serde_json::json!(["process_after"])
        );
    }

    #[test]
    fn end_before_start_is_rejected() {
        let mut req = request(0.0);
        std::mem::swap(&mut req.start_datetime, &mut req.end_datetime);
        let err = req.validate().unwrap_err();
        assert_eq!(err.errors()[0].kind, "value_error");
    }
}
