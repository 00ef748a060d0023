use crate::core::config::CspConfig;
use crate::core::policy::PolicyMap;
use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::sync::Arc;

/// How a resolved header is written onto a response that may already carry
/// one under the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApplyMode {
    /// First write wins: an existing header set earlier in the pipeline is
    /// preserved. Used by the app-wide middleware.
    IfAbsent,
    /// The resolved header unconditionally replaces any existing value. Used
    /// by per-route wrapping.
    Overwrite,
}

/// Middleware that attaches the CSP header to outgoing responses.
///
/// Two modes, matching two registration styles:
///
/// * [`csp_middleware`] wraps the whole app and never clobbers a header a
///   handler set itself.
/// * [`csp_route_header`] / [`csp_route_header_with`] wrap one route or scope
///   and always overwrite, so the route's policy is authoritative.
///
/// In both modes the policy is resolved per request, so
/// [`CspConfig::set_defaults`] takes effect immediately for already-wrapped
/// routes. A route wrapped with an explicit override map is pinned to that
/// map instead.
#[derive(Clone)]
pub struct CspMiddleware {
    config: CspConfig,
    override_map: Option<Arc<PolicyMap>>,
    mode: ApplyMode,
}

impl CspMiddleware {
    #[inline]
    pub fn config(&self) -> &CspConfig {
        &self.config
    }
}

impl<S, B> Transform<S, ServiceRequest> for CspMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = CspMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(CspMiddlewareService {
            service: Rc::new(service),
            config: self.config.clone(),
            override_map: self.override_map.clone(),
            mode: self.mode,
        }))
    }
}

pub struct CspMiddlewareService<S> {
    service: Rc<S>,
    config: CspConfig,
    override_map: Option<Arc<PolicyMap>>,
    mode: ApplyMode,
}

impl<S, B> Service<ServiceRequest> for CspMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let config = self.config.clone();
        let override_map = self.override_map.clone();
        let mode = self.mode;

        Box::pin(async move {
            let mut res = service.call(req).await?;

            match config.resolve(override_map.as_deref()) {
                Ok(resolved) => {
                    let (name, value) = resolved.into_parts();
                    let headers = res.headers_mut();
                    match mode {
                        ApplyMode::Overwrite => {
                            headers.insert(name, value);
                        }
                        ApplyMode::IfAbsent => {
                            if headers.contains_key(&name) {
                                log::debug!("{} already set, preserving existing value", name.as_str());
                            } else {
                                headers.insert(name, value);
                            }
                        }
                    }
                }
                Err(err) => {
                    log::error!("failed to resolve CSP header: {}", err);
                }
            }

            Ok(res)
        })
    }
}

/// App-wide CSP middleware over `config`'s current defaults. A header the
/// handler (or an inner middleware) already set is preserved.
#[inline]
pub fn csp_middleware(config: CspConfig) -> CspMiddleware {
    CspMiddleware {
        config,
        override_map: None,
        mode: ApplyMode::IfAbsent,
    }
}

/// Per-route CSP middleware over `config`'s current defaults, re-read on
/// every request. Overwrites any existing CSP header on the response.
#[inline]
pub fn csp_route_header(config: CspConfig) -> CspMiddleware {
    CspMiddleware {
        config,
        override_map: None,
        mode: ApplyMode::Overwrite,
    }
}

/// Per-route CSP middleware pinned to `map`, ignoring the config's defaults.
/// Overwrites any existing CSP header on the response.
#[inline]
pub fn csp_route_header_with(config: CspConfig, map: PolicyMap) -> CspMiddleware {
    CspMiddleware {
        config,
        override_map: Some(Arc::new(map)),
        mode: ApplyMode::Overwrite,
    }
}
