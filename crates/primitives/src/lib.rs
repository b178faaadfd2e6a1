//! Primitive byte and integer types shared by every crate in the compiler:
//! [`Address`], [`B256`]/[`FixedBytes`], [`Bytes`], [`U256`], and
//! [`keccak256`].
#![warn(missing_docs, unreachable_pub, clippy::missing_const_for_fn)]
#![deny(unused_must_use, rust_2018_idioms)]

pub mod aliases;
pub use aliases::{Selector, StorageSlot, B256, U256};

mod bits;
pub use bits::{Address, AddressError, FixedBytes};

mod bytes;
pub use self::bytes::Bytes;

mod utils;
pub use utils::keccak256;

#[doc(no_inline)]
pub use ruint::{self, Uint};

// Not public API; used by the `wrap_fixed_bytes!` macro.
#[doc(hidden)]
pub mod private {
    pub use derive_more;
}
