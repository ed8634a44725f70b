pub mod status_dto;
pub mod vacancy_dto;
