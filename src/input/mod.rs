pub mod hit_reader;
pub mod pushback;

pub use hit_reader::TabularHitReader;
pub use pushback::PushbackLineReader;
