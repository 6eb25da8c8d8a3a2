pub mod log_table;
pub mod meeting_form;
pub mod notice;
pub mod state_badge;
pub mod upload;
