// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::reservation::ReservationView;

// Contadores calculados numa única consulta
#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerCounters {
    pub total_complexes: i64,
    pub total_terrains: i64,
    pub active_terrains: i64,
    pub total_reservations: i64,
    pub pending_reservations: i64,
    pub reservations_aujourdhui: i64,
    #[schema(example = "4500.00")]
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDashboardStats {
    #[serde(flatten)]
    pub counters: OwnerCounters,
    pub recent_reservations: Vec<ReservationView>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_complexes: i64,
    pub total_owners: i64,
    pub total_clients: i64,
    pub active_terrains: i64,
    pub total_reservations: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_stats_are_flat_in_json() {
        let stats = OwnerDashboardStats {
            counters: OwnerCounters {
                total_complexes: 1,
                pending_reservations: 2,
                reservations_aujourdhui: 3,
                ..Default::default()
            },
            recent_reservations: Vec::new(),
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalComplexes"], 1);
        assert_eq!(json["pendingReservations"], 2);
        assert_eq!(json["reservationsAujourdhui"], 3);
        assert!(json["recentReservations"].as_array().unwrap().is_empty());
    }
}
