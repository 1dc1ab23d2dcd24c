pub mod compose;
pub mod config;
pub mod error;
pub mod geometry;
pub mod limits;
pub mod model;
pub mod observability;
pub mod presets;
pub mod status;
pub mod surface;
pub mod view;
