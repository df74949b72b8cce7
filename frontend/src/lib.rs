//! # codeatlas-frontend
//!
//! Browser controller for the server-rendered course pages: the courses
//! dropdown, the mobile navigation toggle and the signup/login dialogs whose
//! forms post to `/signup` and `/login` and reload the page on success.
//!
//! State logic lives in `state` and `services` behind small traits; `dom`
//! and `router` are the only modules that talk to `web-sys`.

pub mod config;
pub mod dom;
pub mod error;
pub mod router;
pub mod services;
pub mod state;

#[cfg(test)]
pub(crate) mod test_utils;

use anyhow::Context;

use crate::error::PageError;
use crate::router::EventRouter;
use crate::services::logging::{self, Logger};

/// Read the page config, start logging and bind every control on the page
pub fn run() -> anyhow::Result<()> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(PageError::NoDocument)?;

    let (config, config_error) = match dom::read_config(&document) {
        Ok(config) => (config, None),
        Err(e) => (config::PageConfig::default(), Some(e)),
    };

    logging::init(config.log_level);
    if let Some(e) = config_error {
        Logger::warn_with_component("config", &format!("{}; using defaults", e));
    }

    let router = EventRouter::install(&document, config).context("binding page controls")?;
    router.persist();
    Ok(())
}
