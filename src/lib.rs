pub mod constants;
pub mod core;
pub mod error;
pub mod middleware;
pub mod prelude;

// Re-export commonly used types for convenience
pub use crate::core::{CspConfig, PolicyMap, PolicyMapBuilder, ResolvedHeader, Source};
pub use crate::error::CspError;
pub use crate::middleware::{csp_middleware, csp_route_header, csp_route_header_with, CspMiddleware};
