pub mod catalog;
pub mod unit_of_work;

pub use catalog::CatalogService;
pub use unit_of_work::AppUnitOfWork;
