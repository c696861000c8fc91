//! Lazy, capability-tagged sequences of fields.
//!
//! A field that yields many objects returns a [`FieldRange`]. Ranges are
//! lazy: elements are only produced when they are iterated. Each range
//! carries a [`Category`] describing what can be done with it cheaply, and
//! the filter engine uses that category to decide whether a filter can run
//! directly on the range or needs it copied into memory first.
//!
//! ```
//! use std::rc::Rc;
//! use sq_lang::FieldPtr;
//! use sq_lang::range::{Category, FieldRange, Traversal};
//! use sq_lang::system::SqInt;
//!
//! let range = FieldRange::generate(Some(5), Category::new(Traversal::RandomAccess, true), |i| {
//!     Rc::new(SqInt::new(i as i64 * 10)) as FieldPtr
//! });
//! assert_eq!(range.len().unwrap(), 5);
//! ```

use std::collections::VecDeque;
use std::fmt;

use crate::error::{Error, Result};
use crate::field::FieldPtr;

/// How a range can be walked.
///
/// Each level includes the ones before it: random access ranges are also
/// bidirectional, and bidirectional ranges are also forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Traversal {
    /// Single pass; the length is unknown until the range is consumed.
    Input,

    /// Multi pass; the length can be found by walking a copy.
    Forward,

    /// Can also be walked from the back.
    Bidirectional,

    /// Skipping elements in either direction costs nothing.
    RandomAccess,
}

/// Capabilities of a [`FieldRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Category {
    pub traversal: Traversal,

    /// Whether the length is known up front.
    pub sized: bool,
}

impl Category {
    /// Every traversal/sized combination.
    pub const ALL: [Category; 8] = [
        Category::new(Traversal::Input, false),
        Category::new(Traversal::Input, true),
        Category::new(Traversal::Forward, false),
        Category::new(Traversal::Forward, true),
        Category::new(Traversal::Bidirectional, false),
        Category::new(Traversal::Bidirectional, true),
        Category::new(Traversal::RandomAccess, false),
        Category::new(Traversal::RandomAccess, true),
    ];

    pub const fn new(traversal: Traversal, sized: bool) -> Self {
        Category { traversal, sized }
    }

    pub fn is_forward(&self) -> bool {
        self.traversal >= Traversal::Forward
    }

    pub fn is_bidirectional(&self) -> bool {
        self.traversal >= Traversal::Bidirectional
    }

    pub fn is_random_access(&self) -> bool {
        self.traversal == Traversal::RandomAccess
    }

    pub fn is_sized(&self) -> bool {
        self.sized
    }

    /// The length can be found without consuming the range.
    pub fn has_len(&self) -> bool {
        self.sized || self.is_forward()
    }

    fn with_traversal_at_most(self, traversal: Traversal) -> Self {
        Category {
            traversal: self.traversal.min(traversal),
            sized: self.sized,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let traversal = match self.traversal {
            Traversal::Input => "input",
            Traversal::Forward => "forward",
            Traversal::Bidirectional => "bidirectional",
            Traversal::RandomAccess => "random-access",
        };
        let sized = if self.sized { "sized" } else { "unsized" };
        write!(f, "{} {}", traversal, sized)
    }
}

/// Position within a range, shared by every kind of range.
///
/// Operations beyond what a range's category allows report an internal
/// error rather than silently doing expensive work.
pub(crate) trait Cursor {
    fn next(&mut self) -> Result<Option<FieldPtr>>;

    /// Skip up to `n` elements from the front, returning how many were
    /// skipped.
    fn advance(&mut self, n: usize) -> Result<usize> {
        for skipped in 0..n {
            if self.next()?.is_none() {
                return Ok(skipped);
            }
        }
        Ok(n)
    }

    fn next_back(&mut self) -> Result<Option<FieldPtr>> {
        Err(Error::internal("sequence cannot be traversed backwards"))
    }

    fn advance_back(&mut self, n: usize) -> Result<usize> {
        for skipped in 0..n {
            if self.next_back()?.is_none() {
                return Ok(skipped);
            }
        }
        Ok(n)
    }

    /// Number of remaining elements, when it can be known without
    /// consuming anything.
    fn len(&self) -> Option<usize>;

    fn is_unbounded(&self) -> bool {
        false
    }
}

/// Plain iterator: single pass, unknown length.
struct IterCursor<I>(I);

impl<I: Iterator<Item = Result<FieldPtr>>> Cursor for IterCursor<I> {
    fn next(&mut self) -> Result<Option<FieldPtr>> {
        self.0.next().transpose()
    }

    fn len(&self) -> Option<usize> {
        None
    }
}

/// Single pass iterator that knows its length.
struct ExactCursor<I>(I);

impl<I: ExactSizeIterator<Item = FieldPtr>> Cursor for ExactCursor<I> {
    fn next(&mut self) -> Result<Option<FieldPtr>> {
        Ok(self.0.next())
    }

    fn len(&self) -> Option<usize> {
        Some(self.0.len())
    }
}

/// Cloneable iterator; the length is found by walking a clone.
struct CloneCursor<I>(I);

impl<I: Iterator<Item = FieldPtr> + Clone> Cursor for CloneCursor<I> {
    fn next(&mut self) -> Result<Option<FieldPtr>> {
        Ok(self.0.next())
    }

    fn len(&self) -> Option<usize> {
        Some(self.0.clone().count())
    }
}

struct DoubleEndedCursor<I>(I);

impl<I: DoubleEndedIterator<Item = FieldPtr> + Clone> Cursor for DoubleEndedCursor<I> {
    fn next(&mut self) -> Result<Option<FieldPtr>> {
        Ok(self.0.next())
    }

    fn next_back(&mut self) -> Result<Option<FieldPtr>> {
        Ok(self.0.next_back())
    }

    fn len(&self) -> Option<usize> {
        Some(self.0.clone().count())
    }
}

/// Fields held in memory.
struct VecCursor(VecDeque<FieldPtr>);

impl Cursor for VecCursor {
    fn next(&mut self) -> Result<Option<FieldPtr>> {
        Ok(self.0.pop_front())
    }

    fn advance(&mut self, n: usize) -> Result<usize> {
        let n = n.min(self.0.len());
        self.0.drain(..n);
        Ok(n)
    }

    fn next_back(&mut self) -> Result<Option<FieldPtr>> {
        Ok(self.0.pop_back())
    }

    fn advance_back(&mut self, n: usize) -> Result<usize> {
        let n = n.min(self.0.len());
        self.0.truncate(self.0.len() - n);
        Ok(n)
    }

    fn len(&self) -> Option<usize> {
        Some(self.0.len())
    }
}

/// Elements made on demand from their index. Skipping never calls the
/// generator.
struct IndexCursor<F> {
    front: usize,
    /// One past the last index, `None` for an endless sequence
    back: Option<usize>,
    generate: F,
    category: Category,
}

impl<F: FnMut(usize) -> FieldPtr> Cursor for IndexCursor<F> {
    fn next(&mut self) -> Result<Option<FieldPtr>> {
        if self.back.is_some_and(|back| self.front >= back) {
            return Ok(None);
        }
        let field = (self.generate)(self.front);
        self.front += 1;
        Ok(Some(field))
    }

    fn advance(&mut self, n: usize) -> Result<usize> {
        let n = match self.back {
            Some(back) => n.min(back.saturating_sub(self.front)),
            None => n,
        };
        self.front += n;
        Ok(n)
    }

    fn next_back(&mut self) -> Result<Option<FieldPtr>> {
        let back = self.bidirectional_back()?;
        if back <= self.front {
            return Ok(None);
        }
        self.back = Some(back - 1);
        Ok(Some((self.generate)(back - 1)))
    }

    fn advance_back(&mut self, n: usize) -> Result<usize> {
        let back = self.bidirectional_back()?;
        let n = n.min(back.saturating_sub(self.front));
        self.back = Some(back - n);
        Ok(n)
    }

    fn len(&self) -> Option<usize> {
        if !self.category.has_len() {
            return None;
        }
        self.back.map(|back| back.saturating_sub(self.front))
    }

    fn is_unbounded(&self) -> bool {
        self.back.is_none()
    }
}

impl<F> IndexCursor<F> {
    fn bidirectional_back(&self) -> Result<usize> {
        if !self.category.is_bidirectional() {
            return Err(Error::internal(format!(
                "{} sequence cannot be traversed backwards",
                self.category
            )));
        }
        self.back
            .ok_or_else(|| Error::internal("unbounded sequence cannot be traversed backwards"))
    }
}

/// Skips the first `pending` elements of the inner range.
struct DropCursor {
    inner: Box<dyn Cursor>,
    pending: usize,
}

impl DropCursor {
    fn flush(&mut self) -> Result<()> {
        if self.pending > 0 {
            self.inner.advance(self.pending)?;
            self.pending = 0;
        }
        Ok(())
    }
}

impl Cursor for DropCursor {
    fn next(&mut self) -> Result<Option<FieldPtr>> {
        self.flush()?;
        self.inner.next()
    }

    fn advance(&mut self, n: usize) -> Result<usize> {
        self.flush()?;
        self.inner.advance(n)
    }

    fn next_back(&mut self) -> Result<Option<FieldPtr>> {
        self.flush()?;
        self.inner.next_back()
    }

    fn advance_back(&mut self, n: usize) -> Result<usize> {
        self.flush()?;
        self.inner.advance_back(n)
    }

    fn len(&self) -> Option<usize> {
        self.inner.len().map(|len| len.saturating_sub(self.pending))
    }

    fn is_unbounded(&self) -> bool {
        self.inner.is_unbounded()
    }
}

/// Yields at most `remaining` elements from the front of the inner range.
struct TakeCursor {
    inner: Box<dyn Cursor>,
    remaining: usize,
}

impl TakeCursor {
    /// Cut the inner range down to exactly the elements still to be taken,
    /// so that its back is our back.
    fn trim_back(&mut self) -> Result<()> {
        let len = self
            .inner
            .len()
            .ok_or_else(|| Error::internal("cannot find the back of a sequence of unknown length"))?;
        if len > self.remaining {
            self.inner.advance_back(len - self.remaining)?;
        } else {
            self.remaining = len;
        }
        Ok(())
    }
}

impl Cursor for TakeCursor {
    fn next(&mut self) -> Result<Option<FieldPtr>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        match self.inner.next()? {
            Some(field) => {
                self.remaining -= 1;
                Ok(Some(field))
            }
            None => {
                self.remaining = 0;
                Ok(None)
            }
        }
    }

    fn advance(&mut self, n: usize) -> Result<usize> {
        let wanted = n.min(self.remaining);
        let skipped = self.inner.advance(wanted)?;
        self.remaining = if skipped < wanted {
            0
        } else {
            self.remaining - skipped
        };
        Ok(skipped)
    }

    fn next_back(&mut self) -> Result<Option<FieldPtr>> {
        self.trim_back()?;
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        self.inner.next_back()
    }

    fn advance_back(&mut self, n: usize) -> Result<usize> {
        self.trim_back()?;
        let skipped = self.inner.advance_back(n.min(self.remaining))?;
        self.remaining -= skipped;
        Ok(skipped)
    }

    fn len(&self) -> Option<usize> {
        if self.inner.is_unbounded() {
            return Some(self.remaining);
        }
        self.inner.len().map(|len| len.min(self.remaining))
    }
}

/// Yields every `step`th element, starting with the first.
struct StrideCursor {
    inner: Box<dyn Cursor>,
    step: usize,
    started: bool,
}

impl StrideCursor {
    /// Elements of the inner range to skip before the next yielded one.
    fn gap(&self) -> usize {
        if self.started { self.step - 1 } else { 0 }
    }
}

impl Cursor for StrideCursor {
    fn next(&mut self) -> Result<Option<FieldPtr>> {
        let gap = self.gap();
        self.started = true;
        if self.inner.advance(gap)? < gap {
            return Ok(None);
        }
        self.inner.next()
    }

    fn advance(&mut self, n: usize) -> Result<usize> {
        for skipped in 0..n {
            let gap = self.gap() + 1;
            self.started = true;
            if self.inner.advance(gap)? < gap {
                return Ok(skipped);
            }
        }
        Ok(n)
    }

    fn len(&self) -> Option<usize> {
        let len = self.inner.len()?;
        Some(if self.started {
            len / self.step
        } else {
            len.div_ceil(self.step)
        })
    }

    fn is_unbounded(&self) -> bool {
        self.inner.is_unbounded()
    }
}

struct ReverseCursor(Box<dyn Cursor>);

impl Cursor for ReverseCursor {
    fn next(&mut self) -> Result<Option<FieldPtr>> {
        self.0.next_back()
    }

    fn advance(&mut self, n: usize) -> Result<usize> {
        self.0.advance_back(n)
    }

    fn next_back(&mut self) -> Result<Option<FieldPtr>> {
        self.0.next()
    }

    fn advance_back(&mut self, n: usize) -> Result<usize> {
        self.0.advance(n)
    }

    fn len(&self) -> Option<usize> {
        self.0.len()
    }
}

/// Keeps the elements a predicate accepts. Each element is tested once.
struct RetainCursor<P> {
    inner: Box<dyn Cursor>,
    predicate: P,
}

impl<P: FnMut(&FieldPtr) -> Result<bool>> Cursor for RetainCursor<P> {
    fn next(&mut self) -> Result<Option<FieldPtr>> {
        while let Some(field) = self.inner.next()? {
            if (self.predicate)(&field)? {
                return Ok(Some(field));
            }
        }
        Ok(None)
    }

    fn len(&self) -> Option<usize> {
        None
    }

    fn is_unbounded(&self) -> bool {
        self.inner.is_unbounded()
    }
}

/// A lazy sequence of fields.
///
/// Iterating a `FieldRange` yields `Result<FieldPtr>`: producing an element
/// may fail (for example when it is read from the filesystem).
pub struct FieldRange {
    cursor: Box<dyn Cursor>,
    category: Category,
}

impl FieldRange {
    fn with_cursor(cursor: impl Cursor + 'static, category: Category) -> Self {
        FieldRange {
            cursor: Box::new(cursor),
            category,
        }
    }

    /// A single pass range of unknown length.
    pub fn input<I>(iter: I) -> Self
    where
        I: Iterator<Item = FieldPtr> + 'static,
    {
        Self::try_input(iter.map(Ok))
    }

    /// A single pass range of unknown length whose elements may fail to
    /// be produced.
    pub fn try_input<I>(iter: I) -> Self
    where
        I: Iterator<Item = Result<FieldPtr>> + 'static,
    {
        Self::with_cursor(IterCursor(iter), Category::new(Traversal::Input, false))
    }

    /// A single pass range whose length is known.
    pub fn input_sized<I>(iter: I) -> Self
    where
        I: ExactSizeIterator<Item = FieldPtr> + 'static,
    {
        Self::with_cursor(ExactCursor(iter), Category::new(Traversal::Input, true))
    }

    /// A multi pass range. `iter` must be finite.
    pub fn forward<I>(iter: I) -> Self
    where
        I: Iterator<Item = FieldPtr> + Clone + 'static,
    {
        Self::with_cursor(CloneCursor(iter), Category::new(Traversal::Forward, false))
    }

    /// A range that can be walked from either end. `iter` must be finite.
    pub fn bidirectional<I>(iter: I) -> Self
    where
        I: DoubleEndedIterator<Item = FieldPtr> + Clone + 'static,
    {
        Self::with_cursor(
            DoubleEndedCursor(iter),
            Category::new(Traversal::Bidirectional, false),
        )
    }

    /// A random access sized range over fields held in memory.
    pub fn random_access(fields: Vec<FieldPtr>) -> Self {
        Self::with_cursor(
            VecCursor(fields.into()),
            Category::new(Traversal::RandomAccess, true),
        )
    }

    /// A range whose element `i` is `generate(i)`, with the given
    /// capabilities. `len` of `None` makes an endless range.
    ///
    /// Elements are only generated when they are yielded; slicing and
    /// indexing skip over elements without generating them.
    pub fn generate<F>(len: Option<usize>, category: Category, generate: F) -> Self
    where
        F: FnMut(usize) -> FieldPtr + 'static,
    {
        Self::with_cursor(
            IndexCursor {
                front: 0,
                back: len,
                generate,
                category,
            },
            category,
        )
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_forward(&self) -> bool {
        self.category.is_forward()
    }

    pub fn is_bidirectional(&self) -> bool {
        self.category.is_bidirectional()
    }

    pub fn is_random_access(&self) -> bool {
        self.category.is_random_access()
    }

    pub fn is_sized(&self) -> bool {
        self.category.is_sized()
    }

    /// The range never ends.
    pub fn is_unbounded(&self) -> bool {
        self.cursor.is_unbounded()
    }

    /// Number of remaining elements.
    ///
    /// Only available for sized or forward ranges; fails with `OutOfRange`
    /// for endless ranges.
    pub fn len(&self) -> Result<usize> {
        if self.is_unbounded() {
            return Err(Error::out_of_range(
                "cannot find the length of an unbounded sequence",
            ));
        }
        if !self.category.has_len() {
            return Err(Error::internal(format!(
                "length of {} sequence is not known",
                self.category
            )));
        }
        self.cursor
            .len()
            .ok_or_else(|| Error::internal("sequence did not report its length"))
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Element `n` counted from the front, consuming everything before it.
    pub fn nth_field(&mut self, n: usize) -> Result<Option<FieldPtr>> {
        if self.cursor.advance(n)? < n {
            return Ok(None);
        }
        self.cursor.next()
    }

    /// Copy the remaining elements into memory, giving a random access
    /// sized range.
    pub fn materialize(mut self) -> Result<FieldRange> {
        if self.is_unbounded() {
            return Err(Error::out_of_range(
                "cannot materialize an unbounded sequence",
            ));
        }
        let mut fields = VecDeque::new();
        while let Some(field) = self.cursor.next()? {
            fields.push_back(field);
        }
        tracing::debug!(
            from = %self.category,
            count = fields.len(),
            "materialized sequence"
        );
        Ok(Self::with_cursor(
            VecCursor(fields),
            Category::new(Traversal::RandomAccess, true),
        ))
    }

    /// Collect the remaining elements.
    pub fn into_fields(self) -> Result<Vec<FieldPtr>> {
        self.collect()
    }

    /// Skip the first `n` elements.
    pub fn drop_front(self, n: usize) -> FieldRange {
        FieldRange {
            cursor: Box::new(DropCursor {
                inner: self.cursor,
                pending: n,
            }),
            category: self.category,
        }
    }

    /// Keep at most the first `n` elements.
    pub fn take_front(self, n: usize) -> FieldRange {
        let category = Category {
            sized: self.category.sized || self.is_unbounded(),
            ..self.category
        };
        FieldRange {
            cursor: Box::new(TakeCursor {
                inner: self.cursor,
                remaining: n,
            }),
            category,
        }
    }

    /// Keep every `step`th element, starting with the first.
    pub fn stride(self, step: usize) -> Result<FieldRange> {
        if step == 0 {
            return Err(Error::out_of_range("slice step cannot be zero"));
        }
        if step == 1 {
            return Ok(self);
        }
        Ok(FieldRange {
            category: self.category.with_traversal_at_most(Traversal::Forward),
            cursor: Box::new(StrideCursor {
                inner: self.cursor,
                step,
                started: false,
            }),
        })
    }

    /// Walk the range from the back. Requires a bidirectional range.
    pub fn reversed(self) -> Result<FieldRange> {
        if !self.is_bidirectional() {
            return Err(Error::internal(format!(
                "{} sequence cannot be reversed",
                self.category
            )));
        }
        Ok(FieldRange {
            cursor: Box::new(ReverseCursor(self.cursor)),
            category: self.category,
        })
    }

    /// Keep the elements `predicate` accepts. The result is a single pass
    /// range of unknown length.
    pub fn retain<P>(self, predicate: P) -> FieldRange
    where
        P: FnMut(&FieldPtr) -> Result<bool> + 'static,
    {
        FieldRange {
            cursor: Box::new(RetainCursor {
                inner: self.cursor,
                predicate,
            }),
            category: Category::new(Traversal::Input, false),
        }
    }
}

impl Iterator for FieldRange {
    type Item = Result<FieldPtr>;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.next().transpose()
    }
}

impl From<Vec<FieldPtr>> for FieldRange {
    fn from(fields: Vec<FieldPtr>) -> Self {
        FieldRange::random_access(fields)
    }
}

impl FromIterator<FieldPtr> for FieldRange {
    fn from_iter<T: IntoIterator<Item = FieldPtr>>(iter: T) -> Self {
        FieldRange::random_access(iter.into_iter().collect())
    }
}

impl fmt::Debug for FieldRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRange")
            .field("category", &self.category)
            .field("unbounded", &self.is_unbounded())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::system::SqInt;

    fn ints(len: usize, category: Category) -> FieldRange {
        FieldRange::generate(Some(len), category, |i| {
            Rc::new(SqInt::new(i as i64)) as FieldPtr
        })
    }

    fn values(range: FieldRange) -> Vec<i64> {
        range
            .map(|f| match f.unwrap().to_primitive().unwrap() {
                crate::Primitive::Int(n) => n,
                other => panic!("unexpected {:?}", other),
            })
            .collect()
    }

    const RANDOM_ACCESS: Category = Category::new(Traversal::RandomAccess, true);

    #[test]
    fn test_traversal_hierarchy() {
        let ra = RANDOM_ACCESS;
        assert!(ra.is_forward() && ra.is_bidirectional() && ra.is_random_access());
        let input = Category::new(Traversal::Input, false);
        assert!(!input.is_forward() && !input.has_len());
        assert!(Category::new(Traversal::Input, true).has_len());
        assert!(Category::new(Traversal::Forward, false).has_len());
    }

    #[test]
    fn test_drop_take_stride() {
        let range = ints(10, RANDOM_ACCESS).drop_front(2).take_front(5).stride(2).unwrap();
        assert_eq!(range.len().unwrap(), 3);
        assert_eq!(values(range), vec![2, 4, 6]);
    }

    #[test]
    fn test_reverse_of_take() {
        let range = ints(10, RANDOM_ACCESS).drop_front(3).take_front(4).reversed().unwrap();
        assert_eq!(values(range), vec![6, 5, 4, 3]);
    }

    #[test]
    fn test_skipping_does_not_generate() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let mut range = FieldRange::generate(Some(100), RANDOM_ACCESS, move |i| {
            counter.set(counter.get() + 1);
            Rc::new(SqInt::new(i as i64)) as FieldPtr
        });
        let field = range.nth_field(50).unwrap().unwrap();
        assert_eq!(field.to_primitive().unwrap(), crate::Primitive::Int(50));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_unbounded_guards() {
        let range = FieldRange::generate(None, Category::new(Traversal::Forward, false), |i| {
            Rc::new(SqInt::new(i as i64)) as FieldPtr
        });
        assert!(range.is_unbounded());
        assert!(matches!(range.len(), Err(Error::OutOfRange(_))));
        assert!(matches!(range.materialize(), Err(Error::OutOfRange(_))));

        let bounded = FieldRange::generate(None, Category::new(Traversal::Forward, false), |i| {
            Rc::new(SqInt::new(i as i64)) as FieldPtr
        })
        .take_front(3);
        assert_eq!(bounded.len().unwrap(), 3);
        assert_eq!(values(bounded), vec![0, 1, 2]);
    }

    #[test]
    fn test_input_cannot_go_backwards() {
        let range = ints(3, Category::new(Traversal::Input, false));
        assert!(matches!(range.reversed(), Err(Error::Internal(_))));
        let range = ints(3, Category::new(Traversal::Input, false));
        assert!(matches!(range.len(), Err(Error::Internal(_))));
    }

    #[test]
    fn test_iterator_constructors() {
        let fields = || (0..4).map(|i| Rc::new(SqInt::new(i)) as FieldPtr);
        let fields: Vec<FieldPtr> = fields().collect();

        let input = FieldRange::input(fields.clone().into_iter());
        assert_eq!(input.category(), Category::new(Traversal::Input, false));
        assert_eq!(values(input), vec![0, 1, 2, 3]);

        let sized = FieldRange::input_sized(fields.clone().into_iter());
        assert_eq!(sized.len().unwrap(), 4);

        let forward = FieldRange::forward(fields.clone().into_iter()).drop_front(1);
        assert_eq!(forward.len().unwrap(), 3);
        assert_eq!(values(forward), vec![1, 2, 3]);

        let both = FieldRange::bidirectional(fields.into_iter()).take_front(3);
        assert_eq!(values(both.reversed().unwrap()), vec![2, 1, 0]);
    }

    #[test]
    fn test_materialize() {
        let range = ints(4, Category::new(Traversal::Input, false)).materialize().unwrap();
        assert_eq!(range.category(), RANDOM_ACCESS);
        assert_eq!(range.len().unwrap(), 4);
        assert_eq!(values(range.reversed().unwrap()), vec![3, 2, 1, 0]);
    }
}
