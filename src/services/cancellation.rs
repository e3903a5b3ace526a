// src/services/cancellation.rs

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Antecedência mínima para um cliente anular a própria reserva.
pub const CANCELLATION_NOTICE_HOURS: i64 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancellationWindow {
    pub can_cancel: bool,
    /// Tempo até ao prazo limite, ex.: "4h 15m". `None` quando já passou.
    #[schema(example = "4h 15m")]
    pub time_left: Option<String>,
}

pub fn reservation_start(date: NaiveDate, heure_debut: NaiveTime) -> NaiveDateTime {
    date.and_time(heure_debut)
}

/// Tempo que falta até ao prazo de cancelamento (início - 3h). Negativo se já passou.
pub fn time_until_deadline(start: NaiveDateTime, now: NaiveDateTime) -> TimeDelta {
    (start - now) - TimeDelta::hours(CANCELLATION_NOTICE_HOURS)
}

pub fn cancellation_window(start: NaiveDateTime, now: NaiveDateTime) -> CancellationWindow {
    let remaining = time_until_deadline(start, now);
    if remaining > TimeDelta::zero() {
        CancellationWindow {
            can_cancel: true,
            time_left: Some(format_countdown(remaining)),
        }
    } else {
        CancellationWindow {
            can_cancel: false,
            time_left: None,
        }
    }
}

pub fn format_countdown(remaining: TimeDelta) -> String {
    let hours = remaining.num_hours();
    let minutes = remaining.num_minutes() % 60;
    format!("{}h {}m", hours, minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 14)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn less_than_three_hours_is_not_cancellable() {
        let window = cancellation_window(at(18, 0), at(16, 0));
        assert!(!window.can_cancel);
        assert_eq!(window.time_left, None);
    }

    #[test]
    fn exactly_three_hours_is_not_cancellable() {
        let window = cancellation_window(at(18, 0), at(15, 0));
        assert!(!window.can_cancel);
    }

    #[test]
    fn more_than_three_hours_reports_countdown() {
        let window = cancellation_window(at(20, 30), at(12, 15));
        assert!(window.can_cancel);
        assert_eq!(window.time_left.as_deref(), Some("5h 15m"));
    }

    #[test]
    fn countdown_spans_days() {
        let start = NaiveDate::from_ymd_opt(2025, 6, 16)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let window = cancellation_window(start, at(10, 0));
        assert_eq!(window.time_left.as_deref(), Some("45h 0m"));
    }

    #[test]
    fn past_reservation_is_not_cancellable() {
        let window = cancellation_window(at(9, 0), at(12, 0));
        assert!(!window.can_cancel);
    }
}
