/// Dependency tree domain: value types and the pure algorithms that rewrite
/// lockfile aliases, turn graphs and listings into trees, and compare trees.
///
/// Nothing in this module performs I/O.
pub mod domain;
pub mod services;
