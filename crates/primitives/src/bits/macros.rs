/// Wraps a fixed-size byte array in a newtype, delegating all methods to the
/// underlying [`crate::FixedBytes`].
///
/// This functionally creates a new named `FixedBytes` that cannot be
/// type-confused with another named `FixedBytes` of the same length (e.g. an
/// [`Address`](crate::Address) and a function [`Selector`](crate::Selector)
/// are both fixed-length arrays but must never be interchangeable).
#[macro_export]
macro_rules! wrap_fixed_bytes {
    ($(#[$attrs:meta])* $name:ident<$n:literal>) => {
        $(#[$attrs])*
        #[derive(
            $crate::private::derive_more::Deref,
            $crate::private::derive_more::DerefMut,
            $crate::private::derive_more::From,
            Hash, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default,
        )]
        #[repr(transparent)]
        pub struct $name(pub $crate::FixedBytes<$n>);

        impl From<[u8; $n]> for $name {
            #[inline]
            fn from(value: [u8; $n]) -> Self {
                Self(value.into())
            }
        }

        impl From<$name> for [u8; $n] {
            #[inline]
            fn from(value: $name) -> Self {
                value.0 .0
            }
        }

        impl AsRef<[u8]> for $name {
            #[inline]
            fn as_ref(&self) -> &[u8] {
                &self.0 .0
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl $name {
            /// The zero-valued fixed byte array.
            pub const ZERO: Self = Self($crate::FixedBytes::ZERO);

            /// Instantiates a value from the given byte array.
            #[inline]
            pub const fn new(bytes: [u8; $n]) -> Self {
                Self($crate::FixedBytes(bytes))
            }

            /// Number of bytes this type holds.
            #[inline]
            pub const fn len_bytes() -> usize {
                $n
            }

            /// Extracts the byte slice.
            #[inline]
            pub const fn as_bytes(&self) -> &[u8] {
                self.0.as_bytes()
            }

            /// Creates a value from a slice, panicking if lengths differ.
            #[track_caller]
            pub fn from_slice(src: &[u8]) -> Self {
                Self($crate::FixedBytes::from_slice(src))
            }

            /// `true` if every byte is zero.
            #[inline]
            pub fn is_zero(&self) -> bool {
                self.0.is_zero()
            }
        }
    };
}
