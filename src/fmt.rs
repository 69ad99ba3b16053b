//! Logging shims.
//!
//! Dispatches to `defmt` (feature `defmt-0-3`) and/or `log` (feature `log`).
//! With neither feature the arguments are still type-checked but nothing is
//! emitted. Only plain `{}` placeholders are used so both back ends accept
//! the same format strings.
//!
//! Never call these once per sample; `tick()` may only log on message
//! boundaries.
//!
//! The macros are textually scoped: `lib.rs` declares this module first with
//! `#[macro_use]`, so every later module sees them without an import.

#![allow(unused_macros)]

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt-0-3")]
        ::defmt::trace!($($arg)*);
        #[cfg(feature = "log")]
        ::log::trace!($($arg)*);
        #[cfg(not(any(feature = "defmt-0-3", feature = "log")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt-0-3")]
        ::defmt::debug!($($arg)*);
        #[cfg(feature = "log")]
        ::log::debug!($($arg)*);
        #[cfg(not(any(feature = "defmt-0-3", feature = "log")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt-0-3")]
        ::defmt::warn!($($arg)*);
        #[cfg(feature = "log")]
        ::log::warn!($($arg)*);
        #[cfg(not(any(feature = "defmt-0-3", feature = "log")))]
        let _ = ::core::format_args!($($arg)*);
    }};
}
