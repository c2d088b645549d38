pub mod description;
pub mod radius;
