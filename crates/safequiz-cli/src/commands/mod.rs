pub mod classify;
pub mod init;
pub mod play;
pub mod questions;
pub mod tiers;
pub mod validate;
