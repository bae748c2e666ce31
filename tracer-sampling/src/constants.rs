// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Shared constants for the tracer-sampling crate

/// Sampling ratio limits
pub mod ratio {
    /// Maximum sampling ratio
    pub const MAX_RATIO: f64 = 1.0;
    /// Minimum sampling ratio
    pub const MIN_RATIO: f64 = 0.0;
}

/// Numeric constants used in sampling algorithms
pub mod numeric {
    /// Knuth's multiplicative hash factor for deterministic sampling
    pub const KNUTH_FACTOR: u64 = 1_111_111_111_111_111_111;
    /// Maximum 64-bit unsigned integer value
    pub const MAX_UINT_64BITS: u64 = u64::MAX;
}

/// Human readable sampler descriptions
pub mod description {
    pub const ALWAYS_ON: &str = "AlwaysOnSampler";
    pub const ALWAYS_OFF: &str = "AlwaysOffSampler";
    pub const TRACE_ID_RATIO_BASED: &str = "TraceIdRatioBased";
    pub const PARENT_BASED: &str = "ParentBased";
}
