pub use crate::core::{CspConfig, PolicyMap, PolicyMapBuilder, ResolvedHeader, Source};
pub use crate::error::CspError;
pub use crate::middleware::{csp_middleware, csp_route_header, csp_route_header_with, CspMiddleware};
