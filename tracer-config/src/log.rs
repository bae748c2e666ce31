// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Leveled logging for the tracer configuration.
//!
//! Messages go through the `tracer_{debug,info,warn,error}!` macros and are dropped when their
//! level is above [`max_level`].

use std::{
    fmt::{self, Display},
    str::FromStr,
    sync::atomic::{AtomicUsize, Ordering},
};

use serde::Deserialize;

static MAX_LOG_LEVEL: AtomicUsize = AtomicUsize::new(LevelFilter::Error as usize);

pub fn set_max_level(lvl: LevelFilter) {
    MAX_LOG_LEVEL.store(lvl as usize, Ordering::Relaxed)
}

pub fn max_level() -> LevelFilter {
    LevelFilter::from_usize(MAX_LOG_LEVEL.load(Ordering::Relaxed))
}

#[repr(usize)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Deserialize)]
#[serde(try_from = "String")]
#[non_exhaustive]
/// The level at which the tracer will log
pub enum LevelFilter {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LevelFilter {
    fn from_usize(value: usize) -> Self {
        match value {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

impl FromStr for LevelFilter {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("debug")
            || s.eq_ignore_ascii_case("verbose")
            || s.eq_ignore_ascii_case("all")
        {
            Ok(LevelFilter::Debug)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(LevelFilter::Info)
        } else if s.eq_ignore_ascii_case("warn") {
            Ok(LevelFilter::Warn)
        } else if s.eq_ignore_ascii_case("error") {
            Ok(LevelFilter::Error)
        } else if s.eq_ignore_ascii_case("off") || s.eq_ignore_ascii_case("none") {
            Ok(LevelFilter::Off)
        } else {
            Err("log level filter should be one of ALL, VERBOSE, DEBUG, INFO, WARN, ERROR, NONE, OFF")
        }
    }
}

impl TryFrom<String> for LevelFilter {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, &'static str> {
        value.parse()
    }
}

impl Display for LevelFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let filter = match self {
            LevelFilter::Debug => "DEBUG",
            LevelFilter::Info => "INFO",
            LevelFilter::Warn => "WARN",
            LevelFilter::Error => "ERROR",
            LevelFilter::Off => "OFF",
        };

        write!(f, "{filter}")
    }
}

#[repr(usize)]
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Level {
    Error = 1, // must match LevelFilter::Error
    Warn,
    Info,
    Debug,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        };

        write!(f, "{level}")
    }
}

impl PartialEq<LevelFilter> for Level {
    #[inline]
    fn eq(&self, other: &LevelFilter) -> bool {
        (*self as usize) == (*other as usize)
    }
}

impl PartialOrd<LevelFilter> for Level {
    #[inline]
    fn partial_cmp(&self, other: &LevelFilter) -> Option<std::cmp::Ordering> {
        Some((*self as usize).cmp(&(*other as usize)))
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod test_logger {
    //! Thread local logger capturing what the `tracer_(level)!` macros emit, regardless of
    //! the max level.
    //!
    //! ```no_run
    //! let _guard = tracer_config::log::test_logger::activate_test_logger();
    //! tracer_config::tracer_debug!("my log");
    //! let logs = tracer_config::log::test_logger::take_test_logs().unwrap();
    //! // logs contains (Debug, "my log")
    //! ```
    use std::{cell::RefCell, sync::Arc};

    #[derive(Default)]
    struct TestLogger(std::sync::Mutex<Vec<(crate::log::Level, String)>>);

    pub fn print_log(lvl: crate::log::Level, log: std::fmt::Arguments) {
        let _ = LOCAL_LOGGER.try_with(|l| {
            if let Some(l) = &*l.borrow() {
                if let Ok(mut logs) = l.0.lock() {
                    logs.push((lvl, log.to_string()))
                }
            }
        });
    }

    thread_local! {
        static LOCAL_LOGGER: RefCell<Option<Arc<TestLogger>>> = const { RefCell::new(None) };
    }

    pub struct LoggerGuard {
        prev: Option<Arc<TestLogger>>,
    }

    impl Drop for LoggerGuard {
        fn drop(&mut self) {
            LOCAL_LOGGER.set(self.prev.take());
        }
    }

    pub fn activate_test_logger() -> LoggerGuard {
        let prev = LOCAL_LOGGER.replace(Some(Arc::new(TestLogger::default())));
        LoggerGuard { prev }
    }

    pub fn take_test_logs() -> Option<Vec<(crate::log::Level, String)>> {
        LOCAL_LOGGER
            .try_with(|l| {
                l.borrow()
                    .as_deref()
                    .and_then(|l| l.0.lock().ok().map(|mut logs| std::mem::take(&mut *logs)))
            })
            .ok()
            .flatten()
    }
}

pub fn print_log(lvl: Level, log: fmt::Arguments, file: &str, line: u32) {
    if lvl == LevelFilter::Error {
        eprintln!("\x1b[91m{lvl}\x1b[0m {file}:{line} - {log}");
    } else {
        println!("\x1b[93m{lvl}\x1b[0m {file}:{line} - {log}");
    }
}

#[macro_export]
macro_rules! tracer_debug {
    // tracer_debug!("a {} event", "log")
    ($($arg:tt)+) => {
      $crate::tracer_log!($crate::log::Level::Debug, $($arg)*)
    };
}

#[macro_export]
macro_rules! tracer_info {
  ($($arg:tt)+) => {
    $crate::tracer_log!($crate::log::Level::Info, $($arg)*)
  };
}

#[macro_export]
macro_rules! tracer_warn {
  ($($arg:tt)+) => {
    $crate::tracer_log!($crate::log::Level::Warn, $($arg)*)
  };
}

#[macro_export]
macro_rules! tracer_error {
  ($($arg:tt)+) => {
    $crate::tracer_log!($crate::log::Level::Error, $($arg)*)
  };
}

#[macro_export]
macro_rules! tracer_log {
    ($lvl:expr, $first:expr, $($rest:tt)*) => {{
      let lvl = $lvl;
      if lvl <= $crate::log::max_level() {
        let loc = std::panic::Location::caller();
        $crate::log::print_log(lvl, format_args!($first, $($rest)*), loc.file(), loc.line());
      }
      #[cfg(any(test, feature = "test-utils"))]
      {
        $crate::log::test_logger::print_log(lvl, format_args!($first, $($rest)*))
      }
    }};

    ($lvl:expr, $first:expr) => {
      $crate::tracer_log!($lvl, $first,)
    };
}

#[cfg(test)]
mod tests {
    use crate::log::{max_level, set_max_level, test_logger, Level, LevelFilter};

    #[test]
    fn test_max_level() {
        let default_lvl = max_level();
        assert_eq!(LevelFilter::Error, default_lvl);

        set_max_level(LevelFilter::Warn);

        assert_eq!(LevelFilter::Warn, max_level());
        assert!(LevelFilter::Debug > max_level());
        assert!(LevelFilter::Error < max_level());

        set_max_level(default_lvl);
    }

    #[test]
    fn test_level_and_filter() {
        const LEVELS: [Level; 4] = [Level::Error, Level::Warn, Level::Info, Level::Debug];
        const FILTERS: [LevelFilter; 4] = [
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
        ];

        for (lvl_index, lvl) in LEVELS.iter().enumerate() {
            assert!(*lvl > LevelFilter::Off);
            assert!(*lvl == FILTERS[lvl_index]);

            for filter in &FILTERS[lvl_index + 1..] {
                assert!(*lvl < *filter);
            }
        }
    }

    #[test]
    fn test_parse_level_filter() {
        for (raw, expected) in [
            ("debug", LevelFilter::Debug),
            ("ALL", LevelFilter::Debug),
            ("Verbose", LevelFilter::Debug),
            (" info ", LevelFilter::Info),
            ("WARN", LevelFilter::Warn),
            ("error", LevelFilter::Error),
            ("NONE", LevelFilter::Off),
            ("off", LevelFilter::Off),
        ] {
            assert_eq!(raw.parse::<LevelFilter>(), Ok(expected), "parsing {raw:?}");
        }
        assert!("loud".parse::<LevelFilter>().is_err());
        assert_eq!(LevelFilter::default(), LevelFilter::Info);
        assert_eq!(LevelFilter::Warn.to_string(), "WARN");
    }

    #[test]
    fn test_deserialize_level_filter() {
        assert_eq!(
            serde_json::from_str::<LevelFilter>(r#""warn""#).unwrap(),
            LevelFilter::Warn
        );
        assert_eq!(
            LevelFilter::try_from("Verbose".to_string()),
            Ok(LevelFilter::Debug)
        );
        assert!(serde_json::from_str::<LevelFilter>(r#""loud""#).is_err());
        assert!(serde_json::from_str::<LevelFilter>("3").is_err());
    }

    #[test]
    fn test_test_logger() {
        let _g = test_logger::activate_test_logger();
        tracer_debug!("debug log {}", "foo");
        tracer_warn!("warn log");
        let test_logs = test_logger::take_test_logs().unwrap();
        assert_eq!(
            &test_logs,
            &[
                (Level::Debug, "debug log foo".into()),
                (Level::Warn, "warn log".into())
            ]
        );
    }
}
