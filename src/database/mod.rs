pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

pub use memory::MemoryVacancyStore;
pub use postgres::PgVacancyStore;
pub use store::{StatusDeletion, VacancyStore};
