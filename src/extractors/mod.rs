// Extractors: source text to definitions
//
// normalize and fragment are language-neutral; each language module applies
// its own line rules on top of them. factory is the only entry point the
// explorer uses.

pub mod factory;
pub mod fragment;
pub mod java;
pub mod normalize;

pub use factory::{extractor_for_language, extractor_for_path, SourceExtractor};
pub use fragment::Fragment;
pub use java::JavaExtractor;
pub use normalize::normalize;
