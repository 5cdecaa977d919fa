pub mod file;
pub mod join;
