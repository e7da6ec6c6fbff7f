pub mod product;
pub mod catalog;
pub mod view;
pub mod message;
pub mod upload;
pub mod event;
pub mod config;
pub mod error;


pub use error::PharmacyError;
pub type Result<T> = std::result::Result<T, PharmacyError>;
