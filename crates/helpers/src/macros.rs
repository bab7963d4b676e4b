/// Log at trace level when the `dev` feature is enabled
#[macro_export]
macro_rules! dev_trace {
    ($($arg:tt)*) => {
        {
            #[cfg(any(feature = "dev", test))]
            $crate::tracing::trace!($($arg)*);
        }
    };
}

/// Log at debug level when the `dev` feature is enabled
#[macro_export]
macro_rules! dev_debug {
    ($($arg:tt)*) => {
        {
            #[cfg(any(feature = "dev", test))]
            $crate::tracing::debug!($($arg)*);
        }
    };
}

/// Log at info level when the `dev` feature is enabled
#[macro_export]
macro_rules! dev_info {
    ($($arg:tt)*) => {
        {
            #[cfg(any(feature = "dev", test))]
            $crate::tracing::info!($($arg)*);
        }
    };
}

/// Log at warn level when the `dev` feature is enabled
#[macro_export]
macro_rules! dev_warn {
    ($($arg:tt)*) => {
        {
            #[cfg(any(feature = "dev", test))]
            $crate::tracing::warn!($($arg)*);
        }
    };
}

/// Log at error level when the `dev` feature is enabled
#[macro_export]
macro_rules! dev_error {
    ($($arg:tt)*) => {
        {
            #[cfg(any(feature = "dev", test))]
            $crate::tracing::error!($($arg)*);
        }
    };
}
