pub mod identity;
pub mod shift_window;
pub mod table;

pub use identity::*;
pub use shift_window::ShiftWindow;
pub use table::{parse_table_identifier, validate_table_number};
