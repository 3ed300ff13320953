pub mod ast;
pub mod capability;
pub mod commands;
pub mod error;
pub mod matcher;
pub mod registry;
pub mod size;
