//! # Ports Layer
//!
//! Trait definitions for inbound (API) and outbound (SPI) interfaces.

pub mod inbound;
pub mod outbound;
