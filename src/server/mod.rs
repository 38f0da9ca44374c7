mod http;
pub mod types;

pub use http::{create_router, start_http_server};
