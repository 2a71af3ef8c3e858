//! Trace replay tests.
