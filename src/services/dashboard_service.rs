// src/services/dashboard_service.rs

use chrono::NaiveDate;

use crate::{
    common::error::AppError,
    db::{DashboardRepository, ReservationRepository},
    models::dashboard::{AdminStats, OwnerDashboardStats},
};

const RECENT_RESERVATIONS: i64 = 3;

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
    reservation_repo: ReservationRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository, reservation_repo: ReservationRepository) -> Self {
        Self {
            repo,
            reservation_repo,
        }
    }

    pub async fn owner_stats(&self, owner_id: i64, today: NaiveDate) -> Result<OwnerDashboardStats, AppError> {
        let counters = self.repo.owner_counters(owner_id, today).await?;
        let recent_reservations = self
            .reservation_repo
            .recent_for_owner(owner_id, RECENT_RESERVATIONS)
            .await?;

        Ok(OwnerDashboardStats {
            counters,
            recent_reservations,
        })
    }

    pub async fn admin_stats(&self) -> Result<AdminStats, AppError> {
        self.repo.admin_stats().await
    }
}
