pub mod matcher;
pub mod slots;
