//! Helpers shared by the property-based tests.

pub(crate) mod quick;
