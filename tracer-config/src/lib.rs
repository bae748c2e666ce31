// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Resolution of a tracer's effective configuration from built-in defaults, the process
//! environment and caller overrides.

pub mod configuration;
pub mod constants;
pub use configuration::{
    default_config, merge_config, ConfigBuilder, TraceParams, TracerConfig, UserConfig,
    UserTraceParams,
};

mod error;
pub use error::{Error, Result};

pub mod log;

pub use tracer_sampling::{RatioSampler, Sampler};
