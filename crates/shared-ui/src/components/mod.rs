// Standalone components
pub mod badge;
pub mod button;
pub mod card;
pub mod data_table;
pub mod detail_list;
pub mod form;
pub mod form_select;
pub mod input;
pub mod page_header;
pub mod search_bar;
pub mod skeleton;
pub mod textarea;

// Primitive wrappers
pub mod alert_dialog;
pub mod dialog;
pub mod navbar;
pub mod progress;
pub mod tabs;
pub mod toast;

// Charts
pub mod chart;

pub use alert_dialog::*;
pub use badge::*;
pub use button::*;
pub use card::*;
pub use chart::*;
pub use data_table::*;
pub use detail_list::*;
pub use dialog::*;
pub use form::*;
pub use form_select::*;
pub use input::*;
pub use navbar::*;
pub use page_header::*;
pub use progress::*;
pub use search_bar::*;
pub use skeleton::*;
pub use tabs::*;
pub use textarea::*;
pub use toast::*;
