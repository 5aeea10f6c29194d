pub mod app;
pub mod logic;
pub mod model;
