pub mod resume;
pub mod vacancy;
pub mod vacancy_status;
