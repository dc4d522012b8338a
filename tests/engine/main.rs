//! Integration tests for Layer 3: Engine
//!
//! Tests for the query model, temporal resolution, and trajectory joining.

mod join;
