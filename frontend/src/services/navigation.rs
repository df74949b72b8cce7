use super::logging::Logger;

/// Leaves the current page state behind after a successful sign-in
pub trait Navigator {
    fn reload(&self);
}

/// Full reload, so server-side middleware sees the new session cookie
#[derive(Debug, Clone, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn reload(&self) {
        if let Err(e) = gloo::utils::window().location().reload() {
            Logger::error_with_component(
                "navigation",
                &format!("page reload failed: {}", crate::error::js_error_message(&e)),
            );
        }
    }
}
