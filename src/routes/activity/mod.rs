mod handler;
mod model;

pub use handler::{evict, rank, resort, total};
