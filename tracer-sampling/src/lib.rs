// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Sampling strategies handed to the tracer pipeline.
//!
//! Every strategy implements [`opentelemetry_sdk::trace::ShouldSample`].

pub mod constants;
pub mod ratio_sampler;
pub mod sampler;

pub use ratio_sampler::RatioSampler;
pub use sampler::Sampler;
