pub mod account;
pub mod annonce;
pub mod auth;
pub mod complex;
pub mod dashboard;
pub mod reservation;
pub mod terrain;
