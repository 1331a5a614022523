pub mod due;
pub mod voice;
