//! Loading resource tables from embedded defaults and override files.

pub mod loader;
