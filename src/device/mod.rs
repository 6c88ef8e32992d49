pub mod connection;
pub mod constants;
pub mod source;
pub mod types;
