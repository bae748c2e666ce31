// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Configuration of a tracer
//!
//! # Sources of configuration
//!
//! ```text
//! ^ Highest precedence
//! |
//! * UserConfig / ConfigBuilder setters
//! |
//! * OTEL_ prefixed env variables
//! |
//! * Default values
//! |
//! v Lowest level of precedence
//! ```
//!
//! Only the sampler is derived from the environment's `OTEL_SAMPLING_PROBABILITY`, along with
//! the log level from `OTEL_LOG_LEVEL`. Trace params are merged limit by limit, the other
//! fields are replaced as a whole.

#[allow(clippy::module_inception)]
mod configuration;
mod environment;
mod sources;
mod supported_configurations;
mod user_config;

pub use configuration::{default_config, merge_config, ConfigBuilder, TraceParams, TracerConfig};
pub use supported_configurations::SupportedConfigurations;
pub use user_config::{UserConfig, UserTraceParams};
