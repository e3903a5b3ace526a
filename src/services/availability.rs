// src/services/availability.rs
//
// Cálculo dos horários livres de um terreno num dia. Tudo aqui é puro:
// recebe o horário de funcionamento e as reservas já existentes do dia.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{
    reservation::{Reservation, ReservationStatus, ReservationView},
    terrain::LAST_HOUR,
};

/// Horário de funcionamento em horas inteiras, `open..close`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    pub open: u32,
    pub close: u32,
}

impl OpeningHours {
    pub fn new(open: i32, close: i32) -> Self {
        let open = open.clamp(0, LAST_HOUR) as u32;
        let close = (close.clamp(0, LAST_HOUR) as u32).max(open);
        Self { open, close }
    }
}

/// Intervalo ocupado `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedSlot {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl BookedSlot {
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self { start_hour, end_hour }
    }

    /// Um fim fora da hora cheia (ex.: 15:30) ocupa a hora inteira.
    pub fn from_times(start: NaiveTime, end: NaiveTime) -> Self {
        let end_hour = if end.minute() > 0 || end.second() > 0 {
            end.hour() + 1
        } else {
            end.hour()
        };
        Self::new(start.hour(), end_hour)
    }

    pub fn covers(&self, hour: u32) -> bool {
        hour >= self.start_hour && hour < self.end_hour
    }
}

/// Conversão das linhas vindas do banco/API. Reservas anuladas não ocupam horário.
pub trait AsBookedSlot {
    fn booked_slot(&self) -> Option<BookedSlot>;
}

impl AsBookedSlot for BookedSlot {
    fn booked_slot(&self) -> Option<BookedSlot> {
        Some(*self)
    }
}

impl AsBookedSlot for Reservation {
    fn booked_slot(&self) -> Option<BookedSlot> {
        (self.status != ReservationStatus::Annulee)
            .then(|| BookedSlot::from_times(self.heure_debut, self.heure_fin))
    }
}

impl AsBookedSlot for ReservationView {
    fn booked_slot(&self) -> Option<BookedSlot> {
        (self.status != ReservationStatus::Annulee)
            .then(|| BookedSlot::from_times(self.heure_debut, self.heure_fin))
    }
}

pub fn booked_slots<T: AsBookedSlot>(reservations: &[T]) -> Vec<BookedSlot> {
    reservations.iter().filter_map(AsBookedSlot::booked_slot).collect()
}

pub fn is_slot_reserved(hour: u32, booked: &[BookedSlot]) -> bool {
    booked.iter().any(|slot| slot.covers(hour))
}

/// Início da próxima reserva depois de `start`, limitado pelo fecho.
pub fn next_reservation_start(start: u32, hours: OpeningHours, booked: &[BookedSlot]) -> u32 {
    booked
        .iter()
        .map(|slot| slot.start_hour)
        .filter(|&s| s > start && s < hours.close)
        .min()
        .unwrap_or(hours.close)
}

pub fn available_start_hours(hours: OpeningHours, booked: &[BookedSlot]) -> Vec<u32> {
    (hours.open..hours.close)
        .filter(|&h| !is_slot_reserved(h, booked))
        .collect()
}

/// Horas de fim possíveis para um início escolhido. Vazio se o início não estiver livre.
pub fn available_end_hours(start: u32, hours: OpeningHours, booked: &[BookedSlot]) -> Vec<u32> {
    if start < hours.open || start >= hours.close || is_slot_reserved(start, booked) {
        return Vec::new();
    }
    let limit = next_reservation_start(start, hours, booked);
    (start + 1..=limit).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotChoices {
    pub start_hours: Vec<u32>,
    pub end_hours: Vec<u32>,
}

pub fn slot_choices(hours: OpeningHours, booked: &[BookedSlot], start: Option<u32>) -> SlotChoices {
    SlotChoices {
        start_hours: available_start_hours(hours, booked),
        end_hours: start
            .map(|s| available_end_hours(s, hours, booked))
            .unwrap_or_default(),
    }
}

/// Formata uma hora inteira como "HH:00".
pub fn format_hour(hour: u32) -> String {
    format!("{:02}:00", hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hours() -> OpeningHours {
        OpeningHours::new(9, 23)
    }

    fn afternoon_booking() -> Vec<BookedSlot> {
        vec![BookedSlot::new(14, 16)]
    }

    #[test]
    fn start_hours_skip_booked_interval() {
        let starts = available_start_hours(hours(), &afternoon_booking());
        assert!(!starts.contains(&14));
        assert!(!starts.contains(&15));
        let expected: Vec<u32> = (9..=22).filter(|h| *h != 14 && *h != 15).collect();
        assert_eq!(starts, expected);
    }

    #[test]
    fn end_hours_stop_at_next_booking() {
        let ends = available_end_hours(12, hours(), &afternoon_booking());
        assert_eq!(ends, vec![13, 14]);
    }

    #[test]
    fn end_hours_run_until_closing_without_later_booking() {
        let ends = available_end_hours(20, hours(), &afternoon_booking());
        assert_eq!(ends, vec![21, 22, 23]);
    }

    #[test]
    fn end_hours_empty_for_reserved_or_closed_start() {
        assert!(available_end_hours(14, hours(), &afternoon_booking()).is_empty());
        assert!(available_end_hours(23, hours(), &afternoon_booking()).is_empty());
        assert!(available_end_hours(8, hours(), &afternoon_booking()).is_empty());
    }

    #[test]
    fn free_day_exposes_every_opening_hour() {
        let starts = available_start_hours(hours(), &[]);
        assert_eq!(starts.first(), Some(&9));
        assert_eq!(starts.last(), Some(&22));
        assert_eq!(starts.len(), 14);
    }

    #[test]
    fn partial_hour_end_occupies_whole_hour() {
        let slot = BookedSlot::from_times(
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 30, 0).unwrap(),
        );
        assert_eq!(slot, BookedSlot::new(10, 12));
    }

    #[test]
    fn next_start_ignores_bookings_before_start() {
        let booked = vec![BookedSlot::new(10, 11), BookedSlot::new(18, 20)];
        assert_eq!(next_reservation_start(12, hours(), &booked), 18);
        assert_eq!(next_reservation_start(19, hours(), &booked), 23);
    }

    #[test]
    fn slot_choices_combines_both_lists() {
        let choices = slot_choices(hours(), &afternoon_booking(), Some(12));
        assert_eq!(choices.end_hours, vec![13, 14]);
        assert_eq!(choices.start_hours.len(), 12);
    }

    #[test]
    fn end_hours_never_reach_midnight() {
        let late = OpeningHours::new(18, 24);
        assert_eq!(late.close, 23);
        assert_eq!(available_end_hours(22, late, &[]), vec![23]);
        assert!(available_end_hours(23, late, &[]).is_empty());
        assert_eq!(available_start_hours(late, &[]).last(), Some(&22));
    }

    #[test]
    fn hour_is_zero_padded() {
        assert_eq!(format_hour(9), "09:00");
        assert_eq!(format_hour(23), "23:00");
    }
}
