pub mod chained;
pub mod react;
pub mod reflection;

pub use chained::{ChainedOutreach, ExtractedProfile, extract_fields};
pub use react::{ReactStep, ReactTrace, parse_trace};
pub use reflection::{ReflectionOutcome, ReflectionWorkflow};
