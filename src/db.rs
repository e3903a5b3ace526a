pub mod account_repo;
pub use account_repo::AccountRepository;
pub mod complex_repo;
pub use complex_repo::ComplexRepository;
pub mod terrain_repo;
pub use terrain_repo::TerrainRepository;
pub mod reservation_repo;
pub use reservation_repo::ReservationRepository;
pub mod annonce_repo;
pub use annonce_repo::AnnonceRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
