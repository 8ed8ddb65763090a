pub mod api;
pub mod config;
pub mod dates;
pub mod domain;
pub mod error;
pub mod import;
pub mod messaging;
pub mod repository;
pub mod service;
