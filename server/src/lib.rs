//! Employee CRUD service: configuration, HTTP surface and handlers.

pub mod config;
pub mod docs;
pub mod employees;
pub mod http;
