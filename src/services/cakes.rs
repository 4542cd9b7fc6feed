//! Cake catalog service

use crate::{error::AppResult, models::cake::Cake, repository::Repository};

#[derive(Clone)]
pub struct CakesService {
    repository: Repository,
}

impl CakesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Cake>> {
        self.repository.cakes.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Cake> {
        self.repository.cakes.get_by_id(id).await
    }
}
