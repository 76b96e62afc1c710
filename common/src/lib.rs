pub mod config;
pub mod message;
pub mod recipient;
pub mod report;

/// Status line routed through the CLI's tracing print layer.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "mailr::info", $($arg)*)
    };
}

/// Like [`info!`], but rendered with the success symbol.
#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "mailr::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        ::tracing::warn!(target: "mailr::warn", $($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        ::tracing::error!(target: "mailr::error", $($arg)*)
    };
}
