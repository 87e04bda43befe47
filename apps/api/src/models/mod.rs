pub mod analysis;
pub mod interview;
pub mod user;
