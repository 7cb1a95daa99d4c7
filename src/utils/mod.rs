//! Low-level helpers shared by the collectors

pub mod command;
pub mod file;
pub mod locale;
pub mod parsing;
pub mod terminal;
