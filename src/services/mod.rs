//! Background services: memory replay, birthday checks, health endpoints.

pub mod birthday;
pub mod health;
pub mod memory;
