pub mod booking;
pub mod center;
pub mod lenient;
