//! Logging backend selection.
//!
//! Every log line in this crate goes through the macros below, which forward
//! to [`log`](https://docs.rs/log) or [`tracing`](https://docs.rs/tracing)
//! depending on the enabled feature. The features are mutually exclusive.
//!
//! | Feature    | Backend         | Default |
//! |------------|-----------------|---------|
//! | `log`      | `log` crate     | yes     |
//! | `tracing`  | `tracing` crate | no      |
//!
//! With neither feature enabled the macros expand to nothing, and the
//! navigation pipeline stays silent.
//!
//! All records use the `dashboard_nav` target so operators can filter them
//! with e.g. `RUST_LOG=dashboard_nav=debug`.

/// Shared dispatch for the level-specific macros.
macro_rules! nav_log {
    ($level:ident, $($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        ::tracing::$level!(target: "dashboard_nav", $($arg)*);
        #[cfg(feature = "log")]
        ::log::$level!(target: "dashboard_nav", $($arg)*);
        #[cfg(not(any(feature = "log", feature = "tracing")))]
        {
            let _ = format_args!($($arg)*);
        }
    }};
}

/// Per-step detail: cache lookups, individual match attempts.
macro_rules! trace_log {
    ($($arg:tt)*) => {
        $crate::logging::nav_log!(trace, $($arg)*)
    };
}

/// Pipeline decisions: pruned entries, match kinds, invalidations.
macro_rules! debug_log {
    ($($arg:tt)*) => {
        $crate::logging::nav_log!(debug, $($arg)*)
    };
}

/// Degraded input the operator should know about (bad role cookie, expired token).
macro_rules! warn_log {
    ($($arg:tt)*) => {
        $crate::logging::nav_log!(warn, $($arg)*)
    };
}

pub(crate) use debug_log;
pub(crate) use nav_log;
pub(crate) use trace_log;
pub(crate) use warn_log;
