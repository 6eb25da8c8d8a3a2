#[cfg(feature = "server")]
pub(crate) mod auth;

mod session;
pub use session::*;

mod reference;
pub use reference::*;

mod client;
pub use client::*;

mod legal_case;
pub use legal_case::*;

mod meeting;
pub use meeting::*;

mod case_file;
pub use case_file::*;

mod case_update;
pub use case_update::*;

mod log;
pub use log::*;

mod summary;
pub use summary::*;
