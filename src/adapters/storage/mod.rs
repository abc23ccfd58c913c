mod json_lines;
mod memory;

pub use json_lines::JsonLinesCalculationStorer;
pub use memory::InMemoryCalculationStorer;
