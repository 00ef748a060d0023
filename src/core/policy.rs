use crate::constants::{
    BASE_URI, CHILD_SRC, CONNECT_SRC, DEFAULT_BUFFER_CAPACITY, DEFAULT_REPORT_PATH, DEFAULT_SRC,
    HEADER_CSP, HEADER_CSP_REPORT_ONLY, IMG_SRC, MEDIA_SRC, OBJECT_SRC, PLUGIN_SRC, REPORT_ONLY,
    REPORT_URI, SCRIPT_SRC, SELF_SOURCE, SEMICOLON_SPACE, SPACE, STYLE_SRC,
};
use crate::core::source::Source;
use crate::error::CspError;
use actix_web::http::header::{HeaderName, HeaderValue};
use bytes::BytesMut;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::borrow::Cow;
use std::fmt::Write as _;

/// An insertion-ordered mapping of CSP directive names to source-list values,
/// plus the report-only flag that selects the header name.
///
/// Directive names and values are not validated: unknown directives and
/// malformed values pass through verbatim, so new CSP directives work without
/// a crate update. A directive whose value is the empty string is kept in the
/// map but omitted from the rendered header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyMap {
    directives: IndexMap<Cow<'static, str>, Cow<'static, str>>,
    report_only: bool,
}

impl PolicyMap {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in default policy: `default-src 'self'` with violation
    /// reports to `/csp_report`. Every other well-known directive is present
    /// with an empty value, so callers can see (and override) the full shape.
    pub fn builtin_default() -> Self {
        let mut map = Self::new();
        for name in [
            SCRIPT_SRC, IMG_SRC, CHILD_SRC, DEFAULT_SRC, PLUGIN_SRC, STYLE_SRC, MEDIA_SRC,
            OBJECT_SRC, CONNECT_SRC, BASE_URI,
        ] {
            map.insert(name, "");
        }
        map.insert(DEFAULT_SRC, SELF_SOURCE);
        map.insert(REPORT_URI, DEFAULT_REPORT_PATH);
        map
    }

    /// Inserts a directive, replacing any previous value under the same name.
    ///
    /// The key `report-only` is a mode sentinel, not a directive: inserting it
    /// sets [`report_only`](Self::set_report_only) from the value's
    /// truthiness and stores nothing, so the sentinel can never leak into the
    /// rendered header.
    pub fn insert(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> &mut Self {
        let name = name.into();
        let value = value.into();
        if name == REPORT_ONLY {
            self.report_only = is_truthy(&value);
        } else {
            self.directives.insert(name, value);
        }
        self
    }

    /// Builds a map from `(name, value)` pairs, consuming any `report-only`
    /// sentinel pair into the mode flag. The input is copied, never mutated.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        let mut map = Self::new();
        for (name, value) in pairs {
            map.insert(name, value);
        }
        map
    }

    #[inline]
    pub fn set_report_only(&mut self, report_only: bool) -> &mut Self {
        self.report_only = report_only;
        self
    }

    #[inline]
    pub fn is_report_only(&self) -> bool {
        self.report_only
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.directives.get(name).map(Cow::as_ref)
    }

    #[inline]
    pub fn remove(&mut self, name: &str) -> Option<Cow<'static, str>> {
        self.directives.shift_remove(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Directives in insertion order, including empty-valued ones.
    #[inline]
    pub fn directives(&self) -> impl Iterator<Item = (&str, &str)> {
        self.directives.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    #[inline]
    pub fn header_name(&self) -> HeaderName {
        if self.report_only {
            HeaderName::from_static(HEADER_CSP_REPORT_ONLY)
        } else {
            HeaderName::from_static(HEADER_CSP)
        }
    }

    /// Renders the header value: `name value` pairs in insertion order joined
    /// by `"; "`. Empty-valued directives produce no output and no stray
    /// separator. An all-empty map renders the empty string.
    pub fn header_value(&self) -> Result<HeaderValue, CspError> {
        let mut buffer = BytesMut::with_capacity(self.estimated_size().max(DEFAULT_BUFFER_CAPACITY));

        let mut first = true;
        for (name, value) in &self.directives {
            if value.is_empty() {
                continue;
            }
            if !first {
                buffer.extend_from_slice(SEMICOLON_SPACE);
            }
            buffer.extend_from_slice(name.as_bytes());
            buffer.extend_from_slice(SPACE);
            buffer.extend_from_slice(value.as_bytes());
            first = false;
        }

        HeaderValue::from_maybe_shared(buffer.freeze())
            .map_err(|_| CspError::InvalidDirectiveValue("value is not a valid header".to_string()))
    }

    /// Resolves the header name and value together.
    #[inline]
    pub fn resolve(&self) -> Result<ResolvedHeader, CspError> {
        Ok(ResolvedHeader {
            name: self.header_name(),
            value: self.header_value()?,
        })
    }

    fn estimated_size(&self) -> usize {
        self.directives
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, v)| k.len() + v.len() + 3)
            .sum()
    }
}

impl<K, V> FromIterator<(K, V)> for PolicyMap
where
    K: Into<Cow<'static, str>>,
    V: Into<Cow<'static, str>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

// Sentinel truthiness mirrors a boolean serialized into a string map.
fn is_truthy(value: &str) -> bool {
    !(value.is_empty() || value.eq_ignore_ascii_case("false") || value == "0")
}

/// A resolved header pair, ready to be set on a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHeader {
    name: HeaderName,
    value: HeaderValue,
}

impl ResolvedHeader {
    #[inline]
    pub fn name(&self) -> &HeaderName {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &HeaderValue {
        &self.value
    }

    #[inline]
    pub fn into_parts(self) -> (HeaderName, HeaderValue) {
        (self.name, self.value)
    }
}

/// Fluent construction of a [`PolicyMap`].
#[derive(Debug, Default)]
pub struct PolicyMapBuilder {
    map: PolicyMap,
}

impl PolicyMapBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an arbitrary directive. The escape hatch for directives without a
    /// dedicated method, including ones newer than this crate.
    pub fn directive(
        mut self,
        name: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.map.insert(name, value);
        self
    }

    fn sources(self, name: &'static str, sources: impl IntoIterator<Item = Source>) -> Self {
        self.directive(name, join_sources(sources))
    }

    pub fn default_src(self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources(DEFAULT_SRC, sources)
    }

    pub fn script_src(self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources(SCRIPT_SRC, sources)
    }

    pub fn style_src(self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources(STYLE_SRC, sources)
    }

    pub fn img_src(self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources(IMG_SRC, sources)
    }

    pub fn child_src(self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources(CHILD_SRC, sources)
    }

    pub fn plugin_src(self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources(PLUGIN_SRC, sources)
    }

    pub fn media_src(self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources(MEDIA_SRC, sources)
    }

    pub fn object_src(self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources(OBJECT_SRC, sources)
    }

    pub fn connect_src(self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources(CONNECT_SRC, sources)
    }

    pub fn base_uri(self, sources: impl IntoIterator<Item = Source>) -> Self {
        self.sources(BASE_URI, sources)
    }

    #[inline]
    pub fn report_uri(self, uri: impl Into<Cow<'static, str>>) -> Self {
        self.directive(REPORT_URI, uri)
    }

    #[inline]
    pub fn report_only(mut self, enabled: bool) -> Self {
        self.map.set_report_only(enabled);
        self
    }

    #[inline]
    pub fn build(self) -> PolicyMap {
        self.map
    }
}

fn join_sources(sources: impl IntoIterator<Item = Source>) -> String {
    let sources: SmallVec<[Source; 4]> = sources.into_iter().collect();
    let mut value = String::new();
    for (i, source) in sources.iter().enumerate() {
        if i > 0 {
            value.push(' ');
        }
        // Display for Source is infallible.
        let _ = write!(value, "{}", source);
    }
    value
}
