pub mod admin;
pub mod annonces;
pub mod auth;
pub mod client;
pub mod complexes;
pub mod owners;
pub mod reservations;
pub mod terrains;
