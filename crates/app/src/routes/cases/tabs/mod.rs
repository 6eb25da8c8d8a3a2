pub mod files;
pub mod logs;
pub mod meetings;
pub mod updates;
