pub mod bit_row;
pub mod matrix;

pub use bit_row::BitRow;
pub use matrix::BitMatrix;
