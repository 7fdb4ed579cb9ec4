pub mod extract;
pub mod location;
pub mod media;
pub mod normalize;

pub use extract::{extract_features, Features, FEATURE_COUNT, FEATURE_NAMES};
pub use normalize::numeric_value;
