pub mod format;
pub mod platform;
pub mod theme;
pub mod timing;
