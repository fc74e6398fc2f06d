pub mod client;
pub mod models;
pub mod response;

pub use client::make_api_request;
pub use models::RequestBody;
