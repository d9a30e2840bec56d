//! Fixed-size batching of the expanded element list.

use crate::{Error, Result};

/// Iterator over consecutive, non-overlapping sub-slices of at most `size` items.
#[derive(Debug, Clone)]
pub struct Batches<'a, T> {
    remaining: &'a [T],
    size: usize,
}

/// Split `items` into batches of at most `size`, in order.
///
/// Returns a `ConfigError` when `size` is zero.
pub fn batches<T>(items: &[T], size: usize) -> Result<Batches<'_, T>> {
    if size == 0 {
        return Err(Error::ConfigError("batch size must be greater than zero".into()));
    }
    Ok(Batches {
        remaining: items,
        size,
    })
}

impl<'a, T> Iterator for Batches<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        let take = self.size.min(self.remaining.len());
        let (head, tail) = self.remaining.split_at(take);
        self.remaining = tail;
        Some(head)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.len().div_ceil(self.size);
        (n, Some(n))
    }
}

impl<T> ExactSizeIterator for Batches<'_, T> {}
