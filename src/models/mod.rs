pub mod catalog;
pub mod common;
pub mod order;
pub mod staff;

pub use catalog::*;
pub use common::*;
pub use order::*;
pub use staff::*;
