pub mod case_file;
pub mod case_office;
pub mod case_type;
pub mod case_update;
pub mod client;
pub mod dashboard;
pub mod legal_case;
pub mod log;
pub mod meeting;
pub mod user;
