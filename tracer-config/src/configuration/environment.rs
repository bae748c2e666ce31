// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::str::FromStr;

use super::sources::CompositeSource;
use super::supported_configurations::SupportedConfigurations;
use crate::log::LevelFilter;

/// A sampling probability, guaranteed to be a finite number in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub(crate) struct SamplingProbability(f64);

impl SamplingProbability {
    pub(crate) fn value(self) -> f64 {
        self.0
    }
}

impl FromStr for SamplingProbability {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| "sampling probability should be a number")?;
        if !(0.0..=1.0).contains(&value) {
            return Err("sampling probability should be between 0 and 1");
        }
        // "-0" is in range, keep it positive
        Ok(SamplingProbability(value + 0.0))
    }
}

/// The environment variables relevant to tracer configuration, read once per resolution.
///
/// Values that are missing, fail to parse or are out of range are `None`.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct EnvironmentSnapshot {
    pub(crate) sampling_probability: Option<SamplingProbability>,
    pub(crate) log_level: Option<LevelFilter>,
}

impl EnvironmentSnapshot {
    pub(crate) fn from_sources(sources: &CompositeSource) -> Self {
        Self {
            sampling_probability: sources
                .get_parse(SupportedConfigurations::OTEL_SAMPLING_PROBABILITY)
                .into_value(),
            log_level: sources
                .get_parse(SupportedConfigurations::OTEL_LOG_LEVEL)
                .into_value(),
        }
    }
}
