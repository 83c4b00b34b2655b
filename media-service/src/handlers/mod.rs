pub mod faces;
pub mod health;
pub mod image;
pub mod video;
