//! Common test utilities for cartocompare.
//!
//! This module provides shared fixtures and assertions for the integration
//! tests.

#![allow(dead_code)]

pub mod assertions;
pub mod image_utils;
pub mod test_data;
