//! Test module for simplemenu-core
//!
//! This module contains tests for:
//! - Popup placement against panels docked on every edge
//! - Host monitor resolution as windows move between monitors
//! - Root menu model aggregation, pagination and favorites
//! - Configuration loading, reload and application to live models
