pub mod address;
pub mod format;
pub mod json;
