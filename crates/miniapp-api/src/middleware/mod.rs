//! Middleware stack for the mini app API.
//!
//! Layer order: Request → CORS → Tracing → Timeout → Body limit → Panic boundary → Handler

pub mod cors;
pub mod metrics;
pub mod panic;
pub mod timeout;
pub mod tracing;

pub use cors::create_cors_layer;
pub use metrics::{GatewayMetrics, RequestTimer};
pub use panic::create_panic_layer;
pub use timeout::TimeoutLayer;
pub use tracing::{TracingLayer, REQUEST_ID_HEADER};
