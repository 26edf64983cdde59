pub mod files;
pub mod multipart;
pub mod reqwest;
