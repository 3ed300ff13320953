pub mod condition;
pub mod enums;
