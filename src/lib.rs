pub mod configuration;
pub mod domain;
pub mod entities;
pub mod error;
pub mod routes;
pub mod startup;
pub mod storage;
pub mod telemetry;
