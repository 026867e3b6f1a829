pub mod errors;
pub mod models;
pub mod parser;
pub mod ports;
pub mod service;
pub mod validator;

pub use errors::ServiceError;
pub use service::DncService;
