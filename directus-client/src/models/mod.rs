pub mod items;

pub use self::items::{Item, ItemsResponse};
