// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use opentelemetry::trace::{SamplingDecision, SamplingResult, TraceId};
use opentelemetry::Context;
use opentelemetry_sdk::trace::ShouldSample;
use std::fmt;

use crate::constants::{numeric, ratio};
use numeric::{KNUTH_FACTOR, MAX_UINT_64BITS};

/// Keeps (100 * `ratio`)% of the root traces, picked deterministically from the trace id.
///
/// The parent context is ignored: wrap it in [`crate::Sampler::ParentBased`] to honor the
/// decision already taken upstream.
#[derive(Clone)]
pub struct RatioSampler {
    ratio: f64,
    sampling_id_threshold: u64,
}

impl fmt::Debug for RatioSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatioSampler")
            .field("ratio", &self.ratio)
            .finish()
    }
}

impl PartialEq for RatioSampler {
    fn eq(&self, other: &Self) -> bool {
        self.sampling_id_threshold == other.sampling_id_threshold
    }
}

impl RatioSampler {
    fn calculate_threshold(ratio: f64) -> u64 {
        if ratio >= ratio::MAX_RATIO {
            MAX_UINT_64BITS
        } else {
            (ratio * (MAX_UINT_64BITS as f64)) as u64
        }
    }

    /// `ratio` is clamped between 0.0 and 1.0 inclusive. NaN is treated as 0.0.
    pub fn new(ratio: f64) -> Self {
        let clamped = if ratio.is_nan() {
            ratio::MIN_RATIO
        } else {
            ratio.clamp(ratio::MIN_RATIO, ratio::MAX_RATIO)
        };

        RatioSampler {
            ratio: clamped,
            sampling_id_threshold: Self::calculate_threshold(clamped),
        }
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Decision for a root span of the given trace
    pub fn decide(&self, trace_id: TraceId) -> SamplingDecision {
        if self.ratio <= ratio::MIN_RATIO {
            return SamplingDecision::Drop;
        }
        if self.ratio >= ratio::MAX_RATIO {
            return SamplingDecision::RecordAndSample;
        }

        // Lower 64 bits of the trace id
        let trace_id_64bits = u128::from_be_bytes(trace_id.to_bytes()) as u64;
        let hashed_id = trace_id_64bits.wrapping_mul(KNUTH_FACTOR);

        if hashed_id <= self.sampling_id_threshold {
            SamplingDecision::RecordAndSample
        } else {
            SamplingDecision::Drop
        }
    }
}

impl ShouldSample for RatioSampler {
    fn should_sample(
        &self,
        _parent_context: Option<&Context>,
        trace_id: TraceId,
        _name: &str,
        _span_kind: &opentelemetry::trace::SpanKind,
        _attributes: &[opentelemetry::KeyValue],
        _links: &[opentelemetry::trace::Link],
    ) -> SamplingResult {
        SamplingResult {
            decision: self.decide(trace_id),
            attributes: Vec::new(),
            trace_state: Default::default(),
        }
    }
}
