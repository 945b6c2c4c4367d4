//! Common types used throughout pagewalk
//!
//! This module contains shared type definitions, type aliases,
//! and constants used across multiple modules.

use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Pagination Limits
// ============================================================================

/// Largest page size the server accepts
pub const MAX_PAGE_SIZE: u32 = 1000;
