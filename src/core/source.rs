use crate::constants::{
    NONE_SOURCE, SELF_SOURCE, STRICT_DYNAMIC_SOURCE, UNSAFE_EVAL_SOURCE, UNSAFE_INLINE_SOURCE,
};
use std::{borrow::Cow, fmt};

/// A single CSP source expression, rendered into a directive's source list.
///
/// This covers the keyword sources plus host and scheme patterns. Anything
/// more exotic can be passed through as a raw string with
/// [`Source::Host`] or via [`PolicyMapBuilder::directive`](crate::core::policy::PolicyMapBuilder::directive),
/// since directive values are never validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    None_,
    Self_,
    UnsafeInline,
    UnsafeEval,
    StrictDynamic,
    Host(Cow<'static, str>),
    Scheme(Cow<'static, str>),
}

impl Source {
    #[inline(always)]
    pub const fn is_none(&self) -> bool {
        matches!(self, Source::None_)
    }

    #[inline(always)]
    pub const fn is_self(&self) -> bool {
        matches!(self, Source::Self_)
    }

    #[inline]
    pub const fn as_static_str(&self) -> Option<&'static str> {
        match self {
            Source::None_ => Some(NONE_SOURCE),
            Source::Self_ => Some(SELF_SOURCE),
            Source::UnsafeInline => Some(UNSAFE_INLINE_SOURCE),
            Source::UnsafeEval => Some(UNSAFE_EVAL_SOURCE),
            Source::StrictDynamic => Some(STRICT_DYNAMIC_SOURCE),
            _ => None,
        }
    }

    #[inline]
    pub fn host(&self) -> Option<&str> {
        match self {
            Source::Host(host) => Some(host),
            _ => None,
        }
    }

    #[inline]
    pub fn scheme(&self) -> Option<&str> {
        match self {
            Source::Scheme(scheme) => Some(scheme),
            _ => None,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::None_ => f.write_str(NONE_SOURCE),
            Source::Self_ => f.write_str(SELF_SOURCE),
            Source::UnsafeInline => f.write_str(UNSAFE_INLINE_SOURCE),
            Source::UnsafeEval => f.write_str(UNSAFE_EVAL_SOURCE),
            Source::StrictDynamic => f.write_str(STRICT_DYNAMIC_SOURCE),
            Source::Host(host) => f.write_str(host),
            Source::Scheme(scheme) => write!(f, "{}:", scheme),
        }
    }
}

impl From<&'static str> for Source {
    fn from(value: &'static str) -> Self {
        match value {
            NONE_SOURCE => Source::None_,
            SELF_SOURCE => Source::Self_,
            UNSAFE_INLINE_SOURCE => Source::UnsafeInline,
            UNSAFE_EVAL_SOURCE => Source::UnsafeEval,
            STRICT_DYNAMIC_SOURCE => Source::StrictDynamic,
            other => Source::Host(Cow::Borrowed(other)),
        }
    }
}
