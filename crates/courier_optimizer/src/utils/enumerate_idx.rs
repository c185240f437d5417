use std::marker::PhantomData;

/// Like `Iterator::enumerate`, but yields a typed index instead of a `usize`.
pub struct IndexedIter<I, Idx> {
    inner: std::iter::Enumerate<I>,
    _marker: PhantomData<Idx>,
}

pub trait EnumerateIdx<Idx>: Iterator + Sized {
    fn enumerate_idx(self) -> IndexedIter<Self, Idx> {
        IndexedIter {
            inner: self.enumerate(),
            _marker: PhantomData,
        }
    }
}

impl<I: Iterator, Idx> EnumerateIdx<Idx> for I {}

impl<I: Iterator, Idx: From<usize>> Iterator for IndexedIter<I, Idx> {
    type Item = (Idx, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(index, item)| (Idx::from(index), item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<I: ExactSizeIterator, Idx: From<usize>> ExactSizeIterator for IndexedIter<I, Idx> {}
