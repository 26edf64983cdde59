pub mod controller;
pub mod errors;
pub mod envy;
pub mod models;
pub mod router;
pub mod util;

#[cfg(test)]
pub mod test_util;
