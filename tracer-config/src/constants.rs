// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::num::NonZeroU32;

pub const DEFAULT_MAX_ATTRIBUTES_PER_SPAN: NonZeroU32 = NonZeroU32::new(32).unwrap();
pub const DEFAULT_MAX_EVENTS_PER_SPAN: NonZeroU32 = NonZeroU32::new(128).unwrap();
pub const DEFAULT_MAX_LINKS_PER_SPAN: NonZeroU32 = NonZeroU32::new(32).unwrap();

pub const DEFAULT_GRACEFUL_SHUTDOWN: bool = true;
