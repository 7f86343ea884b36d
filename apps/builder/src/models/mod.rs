pub mod bullet;
pub mod entry;
pub mod patch;
pub mod resume;
