pub mod disable_offset_alarms;
pub mod handle_wake;
pub mod sync_alarms;
