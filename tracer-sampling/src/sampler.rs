// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use opentelemetry::trace::{SamplingDecision, SamplingResult, TraceContextExt, TraceId};
use opentelemetry::Context;
use opentelemetry_sdk::trace::ShouldSample;
use serde::Deserialize;
use std::{fmt, sync::Arc};

use crate::constants::description;
use crate::ratio_sampler::RatioSampler;

/// Strategy deciding whether a span is recorded.
///
/// Composite strategies hold the strategy they delegate to, so a parent based sampler with a
/// ratio based root is `Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(..)))`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "SamplerSpec")]
#[non_exhaustive]
pub enum Sampler {
    /// Records every span
    #[default]
    AlwaysOn,
    /// Records nothing
    AlwaysOff,
    /// Keeps a fixed fraction of root traces, picked from the trace id
    TraceIdRatioBased(RatioSampler),
    /// Inherits the decision of the parent span if there is one, asks the root strategy
    /// otherwise
    ParentBased(Box<Sampler>),
    /// Caller provided strategy. Two custom samplers are equal only if they are the same
    /// instance.
    Custom(Arc<dyn ShouldSample>),
}

impl Sampler {
    pub fn trace_id_ratio_based(ratio: f64) -> Self {
        Sampler::TraceIdRatioBased(RatioSampler::new(ratio))
    }

    pub fn parent_based(root: Sampler) -> Self {
        Sampler::ParentBased(Box::new(root))
    }

    pub fn custom<S: ShouldSample + 'static>(sampler: S) -> Self {
        Sampler::Custom(Arc::new(sampler))
    }

    /// Root strategy of a parent based sampler
    pub fn root(&self) -> Option<&Sampler> {
        match self {
            Sampler::ParentBased(root) => Some(root),
            _ => None,
        }
    }
}

impl PartialEq for Sampler {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Sampler::AlwaysOn, Sampler::AlwaysOn) => true,
            (Sampler::AlwaysOff, Sampler::AlwaysOff) => true,
            (Sampler::TraceIdRatioBased(a), Sampler::TraceIdRatioBased(b)) => a == b,
            (Sampler::ParentBased(a), Sampler::ParentBased(b)) => a == b,
            (Sampler::Custom(a), Sampler::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Sampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sampler::AlwaysOn => f.write_str(description::ALWAYS_ON),
            Sampler::AlwaysOff => f.write_str(description::ALWAYS_OFF),
            Sampler::TraceIdRatioBased(sampler) => {
                write!(f, "{}{{{}}}", description::TRACE_ID_RATIO_BASED, sampler.ratio())
            }
            Sampler::ParentBased(root) => {
                write!(f, "{}{{root={root}}}", description::PARENT_BASED)
            }
            Sampler::Custom(sampler) => write!(f, "{sampler:?}"),
        }
    }
}

fn decision_result(decision: SamplingDecision) -> SamplingResult {
    SamplingResult {
        decision,
        attributes: Vec::new(),
        trace_state: Default::default(),
    }
}

impl ShouldSample for Sampler {
    fn should_sample(
        &self,
        parent_context: Option<&Context>,
        trace_id: TraceId,
        name: &str,
        span_kind: &opentelemetry::trace::SpanKind,
        attributes: &[opentelemetry::KeyValue],
        links: &[opentelemetry::trace::Link],
    ) -> SamplingResult {
        match self {
            Sampler::AlwaysOn => decision_result(SamplingDecision::RecordAndSample),
            Sampler::AlwaysOff => decision_result(SamplingDecision::Drop),
            Sampler::TraceIdRatioBased(sampler) => decision_result(sampler.decide(trace_id)),
            Sampler::ParentBased(root) => {
                if let Some(parent_ctx) = parent_context.filter(|cx| cx.has_active_span()) {
                    let span = parent_ctx.span();
                    let parent_span_context = span.span_context();
                    let decision = if parent_span_context.is_sampled() {
                        SamplingDecision::RecordAndSample
                    } else {
                        SamplingDecision::Drop
                    };
                    return SamplingResult {
                        decision,
                        attributes: Vec::new(),
                        trace_state: parent_span_context.trace_state().clone(),
                    };
                }
                root.should_sample(
                    parent_context,
                    trace_id,
                    name,
                    span_kind,
                    attributes,
                    links,
                )
            }
            Sampler::Custom(sampler) => sampler.should_sample(
                parent_context,
                trace_id,
                name,
                span_kind,
                attributes,
                links,
            ),
        }
    }
}

/// Serialized form of a sampler
#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
enum SamplerSpec {
    // Struct variants so that extra fields are rejected
    AlwaysOn {},
    AlwaysOff {},
    TraceIdRatioBased { ratio: f64 },
    ParentBased { root: Box<SamplerSpec> },
}

impl From<SamplerSpec> for Sampler {
    fn from(spec: SamplerSpec) -> Self {
        match spec {
            SamplerSpec::AlwaysOn {} => Sampler::AlwaysOn,
            SamplerSpec::AlwaysOff {} => Sampler::AlwaysOff,
            SamplerSpec::TraceIdRatioBased { ratio } => Sampler::trace_id_ratio_based(ratio),
            SamplerSpec::ParentBased { root } => Sampler::parent_based((*root).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{SpanContext, SpanId, SpanKind, TraceFlags, TraceState};

    fn trace_id_with_low_bits(low: u64) -> TraceId {
        let mut bytes = [0u8; 16];
        bytes[8..16].copy_from_slice(&low.to_be_bytes());
        TraceId::from_bytes(bytes)
    }

    fn parent_context(sampled: bool) -> Context {
        let flags = if sampled {
            TraceFlags::SAMPLED
        } else {
            TraceFlags::default()
        };
        let span_context = SpanContext::new(
            trace_id_with_low_bits(42),
            SpanId::from_bytes([1, 2, 3, 4, 5, 6, 7, 8]),
            flags,
            true,
            TraceState::from_key_value([("vendor", "value")]).unwrap(),
        );
        Context::new().with_remote_span_context(span_context)
    }

    fn decide(sampler: &Sampler, parent: Option<&Context>, trace_id: TraceId) -> SamplingResult {
        sampler.should_sample(parent, trace_id, "span", &SpanKind::Internal, &[], &[])
    }

    #[derive(Debug, Clone)]
    struct DropEverything;

    impl ShouldSample for DropEverything {
        fn should_sample(
            &self,
            _parent_context: Option<&Context>,
            _trace_id: TraceId,
            _name: &str,
            _span_kind: &SpanKind,
            _attributes: &[opentelemetry::KeyValue],
            _links: &[opentelemetry::trace::Link],
        ) -> SamplingResult {
            decision_result(SamplingDecision::Drop)
        }
    }

    #[test]
    fn test_always_on_and_off() {
        let trace_id = trace_id_with_low_bits(9);
        assert_eq!(
            decide(&Sampler::AlwaysOn, None, trace_id).decision,
            SamplingDecision::RecordAndSample
        );
        assert_eq!(
            decide(&Sampler::AlwaysOff, None, trace_id).decision,
            SamplingDecision::Drop
        );
        assert_eq!(Sampler::default(), Sampler::AlwaysOn);
    }

    #[test]
    fn test_parent_based_without_parent_uses_root() {
        let sampler = Sampler::parent_based(Sampler::trace_id_ratio_based(0.5));

        assert_eq!(
            decide(&sampler, None, trace_id_with_low_bits(0)).decision,
            SamplingDecision::RecordAndSample
        );
        assert_eq!(
            decide(&sampler, None, trace_id_with_low_bits(9)).decision,
            SamplingDecision::Drop
        );

        // A context without a span is treated as no parent
        let empty = Context::new();
        assert_eq!(
            decide(&sampler, Some(&empty), trace_id_with_low_bits(9)).decision,
            SamplingDecision::Drop
        );
    }

    #[test]
    fn test_parent_based_inherits_parent_decision() {
        let keep_root = Sampler::parent_based(Sampler::AlwaysOn);
        let drop_root = Sampler::parent_based(Sampler::AlwaysOff);

        let sampled_parent = parent_context(true);
        let result = decide(&drop_root, Some(&sampled_parent), trace_id_with_low_bits(42));
        assert_eq!(result.decision, SamplingDecision::RecordAndSample);
        assert_eq!(result.trace_state.get("vendor"), Some("value"));

        let unsampled_parent = parent_context(false);
        let result = decide(&keep_root, Some(&unsampled_parent), trace_id_with_low_bits(42));
        assert_eq!(result.decision, SamplingDecision::Drop);
    }

    #[test]
    fn test_custom_sampler_is_delegated_to() {
        let sampler = Sampler::custom(DropEverything);
        assert_eq!(
            decide(&sampler, None, trace_id_with_low_bits(0)).decision,
            SamplingDecision::Drop
        );
    }

    #[test]
    fn test_sampler_equality() {
        assert_eq!(
            Sampler::parent_based(Sampler::trace_id_ratio_based(0.5)),
            Sampler::parent_based(Sampler::trace_id_ratio_based(0.5))
        );
        assert_ne!(
            Sampler::parent_based(Sampler::trace_id_ratio_based(0.5)),
            Sampler::trace_id_ratio_based(0.5)
        );

        let custom = Sampler::custom(DropEverything);
        assert_eq!(custom, custom.clone());
        assert_ne!(custom, Sampler::custom(DropEverything));
    }

    #[test]
    fn test_root_accessor() {
        let sampler = Sampler::parent_based(Sampler::trace_id_ratio_based(0.25));
        assert_eq!(sampler.root(), Some(&Sampler::trace_id_ratio_based(0.25)));
        assert_eq!(Sampler::AlwaysOn.root(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Sampler::AlwaysOn.to_string(), "AlwaysOnSampler");
        assert_eq!(Sampler::AlwaysOff.to_string(), "AlwaysOffSampler");
        assert_eq!(
            Sampler::parent_based(Sampler::trace_id_ratio_based(0.5)).to_string(),
            "ParentBased{root=TraceIdRatioBased{0.5}}"
        );
    }

    #[test]
    fn test_deserialize() {
        let sampler: Sampler = serde_json::from_str(
            r#"{"type": "parent_based", "root": {"type": "trace_id_ratio_based", "ratio": 0.1}}"#,
        )
        .unwrap();
        assert_eq!(
            sampler,
            Sampler::parent_based(Sampler::trace_id_ratio_based(0.1))
        );

        let sampler: Sampler = serde_json::from_str(r#"{"type": "always_off"}"#).unwrap();
        assert_eq!(sampler, Sampler::AlwaysOff);

        assert!(serde_json::from_str::<Sampler>(r#"{"type": "sometimes"}"#).is_err());
        assert!(serde_json::from_str::<Sampler>(r#"{"type": "always_on", "ratio": 0.5}"#).is_err());
        assert!(serde_json::from_str::<Sampler>(
            r#"{"type": "parent_based", "root": {"type": "always_on"}, "remote": {}}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Sampler>(
            r#"{"type": "trace_id_ratio_based", "ratio": 0.5, "rate": 0.1}"#
        )
        .is_err());
    }
}
