//! Test suites for the legacy query shim.

mod support;
