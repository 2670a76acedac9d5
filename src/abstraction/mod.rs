pub mod abstractor;
pub mod bucket;
pub mod texture;
