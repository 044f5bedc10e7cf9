// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod mysql_team_repository;

pub use mysql_team_repository::MySqlTeamRepository;
