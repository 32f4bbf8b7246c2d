//! # Domain Layer
//!
//! Pure verification logic with no I/O dependencies.

pub mod errors;
pub mod init_data;
pub mod secret;
pub mod signature;
