pub mod apis;
pub mod controller;
pub mod enums;
pub mod errors;
pub mod materializer;
pub mod models;
pub mod service;
