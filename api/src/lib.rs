// Library exports for testing and external use

pub mod app;
pub mod config;
pub mod cookies;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
