pub mod dtos;
pub mod file_field;
pub mod handlers;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::FileFieldService;
