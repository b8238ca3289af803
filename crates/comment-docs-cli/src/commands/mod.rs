//! CLI command implementations

pub mod build;
pub mod extract;
pub mod init;
pub mod validate;
