pub(crate) const HEADER_CSP: &str = "content-security-policy";
pub(crate) const HEADER_CSP_REPORT_ONLY: &str = "content-security-policy-report-only";

pub(crate) const DEFAULT_SRC: &str = "default-src";
pub(crate) const SCRIPT_SRC: &str = "script-src";
pub(crate) const STYLE_SRC: &str = "style-src";
pub(crate) const IMG_SRC: &str = "img-src";
pub(crate) const CHILD_SRC: &str = "child-src";
pub(crate) const PLUGIN_SRC: &str = "plugin-src";
pub(crate) const MEDIA_SRC: &str = "media-src";
pub(crate) const OBJECT_SRC: &str = "object-src";
pub(crate) const CONNECT_SRC: &str = "connect-src";
pub(crate) const BASE_URI: &str = "base-uri";
pub(crate) const REPORT_URI: &str = "report-uri";

// Mode sentinel; a map key on input, never a directive in output.
pub(crate) const REPORT_ONLY: &str = "report-only";

pub(crate) const NONE_SOURCE: &str = "'none'";
pub(crate) const SELF_SOURCE: &str = "'self'";
pub(crate) const UNSAFE_INLINE_SOURCE: &str = "'unsafe-inline'";
pub(crate) const UNSAFE_EVAL_SOURCE: &str = "'unsafe-eval'";
pub(crate) const STRICT_DYNAMIC_SOURCE: &str = "'strict-dynamic'";

pub(crate) const DEFAULT_REPORT_PATH: &str = "/csp_report";
pub(crate) const SEMICOLON_SPACE: &[u8] = b"; ";
pub(crate) const SPACE: &[u8] = b" ";

pub(crate) const DEFAULT_BUFFER_CAPACITY: usize = 256;
