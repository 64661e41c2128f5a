//! Conditional tracing macros
//!
//! Every diagnostic the engine emits goes through these wrappers so hosts that
//! embed formcheck in size-sensitive builds (wasm bundles, mostly) can compile
//! the logging out by disabling the default `tracing` feature.

#[doc(hidden)]
pub use tracing as __tracing;

/// Log at warn level, only when tracing feature is enabled
#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! trace_warn {
    ($($arg:tt)*) => {
        $crate::tracing_macros::__tracing::warn!($($arg)*)
    };
}

/// Log at warn level, no-op when tracing feature is disabled
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace_warn {
    ($($arg:tt)*) => {};
}

/// Log at debug level, only when tracing feature is enabled
#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! trace_debug {
    ($($arg:tt)*) => {
        $crate::tracing_macros::__tracing::debug!($($arg)*)
    };
}

/// Log at debug level, no-op when tracing feature is disabled
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

/// Log at trace level, only when tracing feature is enabled
#[cfg(feature = "tracing")]
#[macro_export]
macro_rules! trace_trace {
    ($($arg:tt)*) => {
        $crate::tracing_macros::__tracing::trace!($($arg)*)
    };
}

/// Log at trace level, no-op when tracing feature is disabled
#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace_trace {
    ($($arg:tt)*) => {};
}
