//! Business logic services

pub mod cakes;
pub mod orders;
pub mod sales;
pub mod timeslots;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub repository: Repository,
    pub timeslots: timeslots::TimeslotsService,
    pub orders: orders::OrdersService,
    pub sales: sales::SalesService,
    pub cakes: cakes::CakesService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            timeslots: timeslots::TimeslotsService::new(repository.clone()),
            orders: orders::OrdersService::new(repository.clone()),
            sales: sales::SalesService::new(repository.clone()),
            cakes: cakes::CakesService::new(repository.clone()),
            repository,
        }
    }
}
