pub mod csp;

pub use csp::{csp_middleware, csp_route_header, csp_route_header_with, CspMiddleware, CspMiddlewareService};
