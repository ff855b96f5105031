//! Log macros used throughout the crate.
//!
//! Every message goes through one of five macros, so the backend is picked
//! once in `Cargo.toml`: the `log` feature (on by default) or `tracing`.
//! Turn on only one of them, or each message is emitted twice.
//!
//! Levels used here:
//!
//! - `trace_log!`: allowed navigations, idle renders, stale resolutions.
//! - `debug_log!`: held navigations, confirm/cancel, blocker registration.
//! - `info_log!`: mounting a prompt.
//! - `warn_log!`: a blocker that could not be released.
//! - `error_log!`: a confirm dropped because the history was busy.
//!
//! ```ignore
//! use gpui_navigation_prompt::{debug_log, trace_log};
//!
//! trace_log!("Allowing {} -> {}", from, to);
//! debug_log!("Holding navigation to {}", to);
//! ```

/// `trace` level, through `log::trace!` or `tracing::trace!`.
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
    };
}

/// `debug` level, through `log::debug!` or `tracing::debug!`.
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
    };
}

/// `info` level, through `log::info!` or `tracing::info!`.
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::info!($($arg)*);
        #[cfg(feature = "log")]
        ::log::info!($($arg)*);
    };
}

/// `warn` level, through `log::warn!` or `tracing::warn!`.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::warn!($($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
    };
}

/// `error` level, through `log::error!` or `tracing::error!`.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::error!($($arg)*);
        #[cfg(feature = "log")]
        ::log::error!($($arg)*);
    };
}
