//! Fallible collection building.

/// A fallible version of [`FromIterator`].
///
/// Used to build collections which validate their items, like a
/// [`Properties`](crate::properties::Properties) bag rejecting duplicate
/// names. Building stops at the first invalid item.
pub trait TryFromIterator<T>: Sized {
    type Error: std::error::Error;

    fn try_from_iter<I: IntoIterator<Item = T>>(iter: I) -> Result<Self, Self::Error>;
}
