// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! Record identity uniqueness and composition determinism.

mod determinism;
mod record_identity;
