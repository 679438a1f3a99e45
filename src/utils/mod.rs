// Utilities shared by the explorer and its configuration

/// Directory to namespace conversion
pub mod paths;

/// Ignore rule utilities (.pdgignore support)
pub mod ignore;
