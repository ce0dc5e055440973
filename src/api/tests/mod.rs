//! Unit tests for the API boundary.
