pub mod access_policy;
pub mod billing_service;
pub mod catalog_service;
pub mod lifecycle_service;
pub mod order_query_service;
pub mod order_service;
pub mod staff_service;

pub use billing_service::*;
pub use catalog_service::*;
pub use lifecycle_service::*;
pub use order_query_service::*;
pub use order_service::*;
pub use staff_service::*;
