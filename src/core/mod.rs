pub mod config;
pub mod policy;
pub mod source;

pub use config::CspConfig;
pub use policy::{PolicyMap, PolicyMapBuilder, ResolvedHeader};
pub use source::Source;
