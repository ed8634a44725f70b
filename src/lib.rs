pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use crate::database::VacancyStore;
use crate::middleware::auth::JwtVerifier;
use crate::services::vacancy_service::VacancyService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VacancyStore>,
    pub verifier: JwtVerifier,
    pub vacancy_service: VacancyService,
}

impl AppState {
    pub fn new(store: Arc<dyn VacancyStore>, jwt_secret: &str) -> Self {
        let vacancy_service = VacancyService::new(store.clone());
        let verifier = JwtVerifier::new(jwt_secret);

        Self {
            store,
            verifier,
            vacancy_service,
        }
    }
}
