pub mod annonce_service;
pub mod auth;
pub mod availability;
pub mod cancellation;
pub mod complex_service;
pub mod dashboard_service;
pub mod owner_service;
pub mod reservation_service;
pub mod terrain_service;
