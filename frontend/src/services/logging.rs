use crate::config::LogLevel;

/// Install the browser console logger and panic hook.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init(level: LogLevel) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level.into()).is_err() {
        log::debug!(target: "logging", "console logger already installed");
    }
}

/// Component-scoped logging over the `log` facade
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        log::debug!(target: component, "{}", message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        log::info!(target: component, "{}", message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        log::warn!(target: component, "{}", message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        log::error!(target: component, "{}", message);
    }
}
