#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod user_tests;

#[cfg(test)]
mod client_tests;

#[cfg(test)]
mod legal_case_tests;

#[cfg(test)]
mod meeting_tests;

#[cfg(test)]
mod case_file_tests;

#[cfg(test)]
mod case_update_tests;

#[cfg(test)]
mod log_tests;

#[cfg(test)]
mod summary_tests;
