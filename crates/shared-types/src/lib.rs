pub mod error;
pub mod feature_flags;

// Casebook domain modules
pub mod case_file;
pub mod case_office;
pub mod case_update;
pub mod client;
pub mod dashboard;
pub mod legal_case;
pub mod log;
pub mod meeting;
pub mod upload;
pub mod user;

pub use error::*;
pub use feature_flags::*;

pub use case_file::*;
pub use case_office::*;
pub use case_update::*;
pub use client::*;
// dashboard types are NOT glob re-exported: the metric name constants
// would crowd the crate root. Use shared_types::dashboard::* instead.
pub use dashboard::{DataByRange, DataDailyPerMonth, DataMonthly, DataPoint, SummaryQuery};
pub use legal_case::*;
pub use log::*;
pub use meeting::*;
pub use upload::*;
pub use user::*;
