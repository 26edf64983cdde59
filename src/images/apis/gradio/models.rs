pub mod file_data;
pub mod input_spec;
