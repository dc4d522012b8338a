//! Integration tests for Layer 2: Map
//!
//! Tests for lanes and lane lookup on road maps.
