//! Test infrastructure
