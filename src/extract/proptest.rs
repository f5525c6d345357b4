//! Property-based tests for behaviour extraction.
//!
//! - Extracted behaviours never carry an empty expression
//! - Extraction is deterministic
//! - Attribute names round-trip through the method-name conventions
