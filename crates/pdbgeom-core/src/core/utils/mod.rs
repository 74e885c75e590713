pub mod geometry;
pub mod labels;
