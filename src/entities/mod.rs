pub mod drink_categories;
pub mod drinks;
pub mod order_lines;
pub mod orders;
pub mod staff;

pub use drink_categories as drink_category_entity;
pub use drinks as drink_entity;
pub use order_lines as order_line_entity;
pub use orders as order_entity;
pub use orders::OrderStatus;
pub use staff as staff_entity;
