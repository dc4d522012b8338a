//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: errors, the action vocabulary, geometry, and configuration.

mod config;
