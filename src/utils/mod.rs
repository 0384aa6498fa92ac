pub mod timestamps;

pub use timestamps::{format_distance, format_distance_to_now, format_relative};
