pub mod item;

pub use item::SalesItem;
