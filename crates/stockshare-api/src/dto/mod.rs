//! Request and response bodies.

pub mod lenient;
pub mod request;
pub mod response;
