// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Environment variables read when resolving a tracer configuration
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedConfigurations {
    /// Probability in `[0, 1]` that a root trace is sampled
    OTEL_SAMPLING_PROBABILITY,
    /// Verbosity of the tracer's own logs
    OTEL_LOG_LEVEL,
}

impl SupportedConfigurations {
    pub const fn as_str(&self) -> &'static str {
        match self {
            SupportedConfigurations::OTEL_SAMPLING_PROBABILITY => "OTEL_SAMPLING_PROBABILITY",
            SupportedConfigurations::OTEL_LOG_LEVEL => "OTEL_LOG_LEVEL",
        }
    }
}
