//! Workflow tests and the in-memory tracker they run against.
