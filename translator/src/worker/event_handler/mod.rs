pub mod service;
pub mod translation;
