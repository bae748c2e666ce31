// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use tracer_sampling::Sampler;

use crate::log::LevelFilter;

/// Per span limits supplied by the caller.
///
/// A limit of `0` counts as not supplied, the default limit is used instead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserTraceParams {
    #[serde(default)]
    pub number_of_attributes_per_span: Option<u32>,
    #[serde(default)]
    pub number_of_events_per_span: Option<u32>,
    #[serde(default)]
    pub number_of_links_per_span: Option<u32>,
}

/// Overrides supplied by the caller when building a tracer.
///
/// Every field left to `None` falls back to the environment or to the defaults.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserConfig {
    #[serde(default)]
    pub sampler: Option<Sampler>,
    #[serde(default)]
    pub trace_params: Option<UserTraceParams>,
    #[serde(default)]
    pub log_level: Option<LevelFilter>,
    #[serde(default)]
    pub graceful_shutdown: Option<bool>,
}

impl UserConfig {
    /// Reads caller overrides from a JSON document
    ///
    /// ```
    /// use tracer_config::UserConfig;
    ///
    /// let user = UserConfig::from_json(r#"{"traceParams": {"numberOfLinksPerSpan": 8}}"#)?;
    /// assert_eq!(user.trace_params.unwrap().number_of_links_per_span, Some(8));
    /// # Ok::<(), tracer_config::Error>(())
    /// ```
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| crate::Error::from(e).context("invalid tracer configuration"))
    }
}

#[cfg(test)]
mod tests {
    use super::{UserConfig, UserTraceParams};
    use crate::log::LevelFilter;
    use tracer_sampling::Sampler;

    #[test]
    fn test_from_json_empty() {
        assert_eq!(UserConfig::from_json("{}").unwrap(), UserConfig::default());
    }

    #[test]
    fn test_from_json_full() {
        let user = UserConfig::from_json(
            r#"{
                "sampler": {"type": "always_off"},
                "traceParams": {"numberOfAttributesPerSpan": 0, "numberOfEventsPerSpan": 5},
                "logLevel": "debug",
                "gracefulShutdown": false
            }"#,
        )
        .unwrap();

        assert_eq!(
            user,
            UserConfig {
                sampler: Some(Sampler::AlwaysOff),
                trace_params: Some(UserTraceParams {
                    number_of_attributes_per_span: Some(0),
                    number_of_events_per_span: Some(5),
                    number_of_links_per_span: None,
                }),
                log_level: Some(LevelFilter::Debug),
                graceful_shutdown: Some(false),
            }
        );
    }

    #[test]
    fn test_from_json_errors() {
        let err = UserConfig::from_json(r#"{"traceParams": {"numberOfEventsPerSpan": -1}}"#)
            .unwrap_err();
        assert!(err.to_string().starts_with("invalid tracer configuration"));

        assert!(UserConfig::from_json(r#"{"samplr": {"type": "always_on"}}"#).is_err());
        assert!(UserConfig::from_json(r#"{"logLevel": "chatty"}"#).is_err());
        assert!(UserConfig::from_json("not json").is_err());
    }
}
