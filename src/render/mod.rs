pub mod canvas;
pub mod composite;
pub mod pipeline;
