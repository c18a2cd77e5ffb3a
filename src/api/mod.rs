mod handlers;
pub mod interceptor;
pub mod response;
mod routes;

pub use interceptor::{intercept, Interceptor};
pub use routes::create_router;
