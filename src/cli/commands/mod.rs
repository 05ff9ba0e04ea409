pub mod permissions;
pub mod project;
