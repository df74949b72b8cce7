pub mod api;
pub mod logging;
pub mod modal_flow;
pub mod navigation;
pub mod submission;
