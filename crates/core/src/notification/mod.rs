mod fetch;
pub mod get_notifications;
pub mod get_unread_content;
pub mod mark_read;
