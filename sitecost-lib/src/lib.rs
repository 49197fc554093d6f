#[macro_use]
extern crate actix_web;

pub mod auth;
pub mod config;
pub mod draw;
mod error;
pub mod expense;
pub mod forecast;
pub mod health;
pub mod project;
pub mod tracing;
