pub mod modal_coordinator;
pub mod visibility;
