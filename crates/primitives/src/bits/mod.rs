#[macro_use]
mod macros;

mod address;
pub use address::{Address, AddressError};

mod fixed;
pub use fixed::FixedBytes;
