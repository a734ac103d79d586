//! Feature extraction and encoding
//!
//! Converts a validated event record into the row the classifier expects.

pub mod align;
pub mod encoder;
pub mod encoding;
pub mod vector;

pub use align::align;
pub use encoder::FeatureEncoder;
pub use encoding::CategoricalEncoder;
pub use vector::EncodedFeatureVector;
