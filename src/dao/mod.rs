/// Relational persistence for users, games and their activity.
pub mod activity_store;
/// Database model definitions.
pub mod models;
/// Demo data inserted into an empty database.
pub mod seed;
/// Storage abstraction layer for database operations.
pub mod storage;
