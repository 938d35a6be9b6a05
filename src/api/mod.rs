pub mod dtos;
pub mod error;
pub mod handlers;

pub use dtos::{AnalyzeRequest, ErrorResponse};
pub use error::ApiError;
