// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::num::NonZeroU32;

use lazy_static::lazy_static;
use tracer_sampling::Sampler;

use super::environment::EnvironmentSnapshot;
use super::sources::CompositeSource;
use super::user_config::{UserConfig, UserTraceParams};
use crate::constants::{
    DEFAULT_GRACEFUL_SHUTDOWN, DEFAULT_MAX_ATTRIBUTES_PER_SPAN, DEFAULT_MAX_EVENTS_PER_SPAN,
    DEFAULT_MAX_LINKS_PER_SPAN,
};
use crate::log::LevelFilter;

/// Per span limits applied by the span processing pipeline before truncation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceParams {
    pub number_of_attributes_per_span: NonZeroU32,
    pub number_of_events_per_span: NonZeroU32,
    pub number_of_links_per_span: NonZeroU32,
}

impl Default for TraceParams {
    fn default() -> Self {
        TraceParams {
            number_of_attributes_per_span: DEFAULT_MAX_ATTRIBUTES_PER_SPAN,
            number_of_events_per_span: DEFAULT_MAX_EVENTS_PER_SPAN,
            number_of_links_per_span: DEFAULT_MAX_LINKS_PER_SPAN,
        }
    }
}

impl TraceParams {
    /// Extends the default limits with the caller's.
    ///
    /// Each limit is taken from `user` when present and non zero, otherwise the built-in
    /// default limit is used. Zero limits are never produced.
    fn extend_defaults(user: &UserTraceParams) -> Self {
        fn or_default(value: Option<u32>, default: NonZeroU32) -> NonZeroU32 {
            value.and_then(NonZeroU32::new).unwrap_or(default)
        }

        TraceParams {
            number_of_attributes_per_span: or_default(
                user.number_of_attributes_per_span,
                DEFAULT_MAX_ATTRIBUTES_PER_SPAN,
            ),
            number_of_events_per_span: or_default(
                user.number_of_events_per_span,
                DEFAULT_MAX_EVENTS_PER_SPAN,
            ),
            number_of_links_per_span: or_default(
                user.number_of_links_per_span,
                DEFAULT_MAX_LINKS_PER_SPAN,
            ),
        }
    }
}

lazy_static! {
    static ref DEFAULT_CONFIG: TracerConfig = TracerConfig {
        sampler: Sampler::AlwaysOn,
        trace_params: TraceParams::default(),
        log_level: LevelFilter::default(),
        graceful_shutdown: DEFAULT_GRACEFUL_SHUTDOWN,
    };
}

/// The built-in configuration every resolution starts from
pub fn default_config() -> &'static TracerConfig {
    &DEFAULT_CONFIG
}

#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
/// Resolved configuration of a tracer
///
/// Every field is populated. Values come from, by increasing precedence:
/// the built-in defaults, the environment, and the caller's [`UserConfig`].
///
/// # Usage
/// ```
/// use tracer_config::{Sampler, TracerConfig};
///
/// // Environment is read when the configuration is built
/// let mut builder = TracerConfig::builder();
///
/// // Manual overrides
/// builder
///     .set_sampler(Sampler::parent_based(Sampler::trace_id_ratio_based(0.25)))
///     .set_number_of_events_per_span(64);
///
/// let config = builder.build();
/// assert_eq!(config.trace_params().number_of_events_per_span.get(), 64);
/// ```
pub struct TracerConfig {
    /// Decides which spans are recorded
    sampler: Sampler,
    /// Per span limits
    trace_params: TraceParams,
    /// Verbosity of the tracer's own logs
    log_level: LevelFilter,
    /// Flush pending spans when the process shuts down
    graceful_shutdown: bool,
}

/// Sampler derived from the environment probability, if any
fn env_sampler(env: &EnvironmentSnapshot) -> Option<Sampler> {
    // A probability of 1 keeps everything, the default sampler already does that
    let probability = env
        .sampling_probability
        .map(|p| p.value())
        .filter(|p| *p < 1.0)?;
    crate::tracer_debug!(
        "Sampling {} of root traces from the environment",
        probability
    );
    Some(Sampler::parent_based(Sampler::trace_id_ratio_based(
        probability,
    )))
}

impl TracerConfig {
    fn from_sources(user: UserConfig, sources: &CompositeSource) -> Self {
        let env = EnvironmentSnapshot::from_sources(sources);
        Self::merge(user, &env)
    }

    /// Layers `user` over the environment over the defaults
    fn merge(user: UserConfig, env: &EnvironmentSnapshot) -> Self {
        let default = default_config();

        let trace_params = match &user.trace_params {
            Some(params) => TraceParams::extend_defaults(params),
            None => default.trace_params,
        };

        Self {
            sampler: user
                .sampler
                .or_else(|| env_sampler(env))
                .unwrap_or_else(|| default.sampler.clone()),
            trace_params,
            log_level: user.log_level.or(env.log_level).unwrap_or(default.log_level),
            graceful_shutdown: user
                .graceful_shutdown
                .unwrap_or(default.graceful_shutdown),
        }
    }

    fn builder_with_sources(sources: CompositeSource) -> ConfigBuilder {
        ConfigBuilder {
            user: UserConfig::default(),
            sources,
        }
    }

    /// Creates a new builder to set overrides over the detected configuration
    pub fn builder() -> ConfigBuilder {
        Self::builder_with_sources(CompositeSource::default_sources())
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    pub fn trace_params(&self) -> &TraceParams {
        &self.trace_params
    }

    pub fn trace_params_mut(&mut self) -> &mut TraceParams {
        &mut self.trace_params
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn graceful_shutdown(&self) -> bool {
        self.graceful_shutdown
    }

    /// Splits the configuration into the parts consumed by the span pipeline
    pub fn into_parts(self) -> (Sampler, TraceParams) {
        (self.sampler, self.trace_params)
    }
}

impl Default for TracerConfig {
    fn default() -> Self {
        default_config().clone()
    }
}

/// Resolves the effective tracer configuration.
///
/// Merges, by increasing precedence, the built-in defaults, the sampler derived from
/// `OTEL_SAMPLING_PROBABILITY`, and `user`. The environment is read on every call. This never
/// fails: missing or malformed environment values are ignored, missing user values fall back to
/// the defaults.
///
/// A probability strictly below 1 yields a parent based sampler whose root keeps that ratio of
/// traces. A caller supplied sampler always wins over it.
pub fn merge_config(user: UserConfig) -> TracerConfig {
    TracerConfig::from_sources(user, &CompositeSource::default_sources())
}

pub struct ConfigBuilder {
    user: UserConfig,
    sources: CompositeSource,
}

impl ConfigBuilder {
    /// Finalizes the builder and returns the configuration
    pub fn build(self) -> TracerConfig {
        TracerConfig::from_sources(self.user, &self.sources)
    }

    pub fn set_sampler(&mut self, sampler: Sampler) -> &mut Self {
        self.user.sampler = Some(sampler);
        self
    }

    pub fn set_trace_params(&mut self, trace_params: UserTraceParams) -> &mut Self {
        self.user.trace_params = Some(trace_params);
        self
    }

    pub fn set_number_of_attributes_per_span(&mut self, limit: u32) -> &mut Self {
        self.trace_params_mut().number_of_attributes_per_span = Some(limit);
        self
    }

    pub fn set_number_of_events_per_span(&mut self, limit: u32) -> &mut Self {
        self.trace_params_mut().number_of_events_per_span = Some(limit);
        self
    }

    pub fn set_number_of_links_per_span(&mut self, limit: u32) -> &mut Self {
        self.trace_params_mut().number_of_links_per_span = Some(limit);
        self
    }

    pub fn set_log_level(&mut self, log_level: LevelFilter) -> &mut Self {
        self.user.log_level = Some(log_level);
        self
    }

    pub fn set_graceful_shutdown(&mut self, graceful_shutdown: bool) -> &mut Self {
        self.user.graceful_shutdown = Some(graceful_shutdown);
        self
    }

    fn trace_params_mut(&mut self) -> &mut UserTraceParams {
        self.user.trace_params.get_or_insert_with(UserTraceParams::default)
    }
}

impl From<UserConfig> for ConfigBuilder {
    fn from(user: UserConfig) -> Self {
        ConfigBuilder {
            user,
            sources: CompositeSource::default_sources(),
        }
    }
}
