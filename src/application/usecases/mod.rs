pub mod clear_messages;
pub mod list_messages;
pub mod register_chat;
pub mod schedule_message;
