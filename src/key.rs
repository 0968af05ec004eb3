//! Key extraction for merged elements.
//!
//! All ordering decisions are made on keys, so the element type itself never has to be ordered.

/// Projects an element onto the key it is ordered by.
pub trait KeyFn<T> {
    /// Key produced for an element
    type Key;

    /// Extracts the key of `item`.
    fn key_of(&self, item: &T) -> Self::Key;
}

/// The element is its own key. This is the default of every merge.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl<T: Clone> KeyFn<T> for Identity {
    type Key = T;

    #[inline]
    fn key_of(&self, item: &T) -> T {
        item.clone()
    }
}

/// Orders elements by the key produced by a function
///
/// Construct via [`Builder::by_key`](crate::Builder::by_key)
#[derive(Debug, Clone)]
pub struct ByKey<F>(pub(crate) F);

impl<T, K, F> KeyFn<T> for ByKey<F>
where
    F: Fn(&T) -> K,
{
    type Key = K;

    // Leaving decision to inline this to the compiler because F can be long
    fn key_of(&self, item: &T) -> K {
        self.0(item)
    }
}
