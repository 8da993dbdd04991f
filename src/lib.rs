//! FixedArray: a fixed-capacity sequence container with bounds-checked access.
//!
//! A `FixedArray<T, N>` owns exactly `N` elements of type `T` in contiguous
//! storage. The element count is fixed at compile time and never changes:
//! there is no push, no pop, no resize. What it offers instead is value
//! semantics (deep copy on clone), element access that is always
//! bounds-checked, and explicit cursor types for forward iteration.
//!
//! # Why fixed?
//!
//! Some data really is a fixed-size block: a board of `N` cells, a table of
//! `N` registers, a window of `N` samples. Modelling it with `Vec` invites
//! accidental growth; modelling it with `[T; N]` gives up recoverable bounds
//! errors. `FixedArray` sits in between:
//!
//! - **Fixed count**: constructed full, stays full, dropped full
//! - **Checked access**: [`get`](FixedArray::get) / [`get_mut`](FixedArray::get_mut)
//!   return `Result` instead of panicking
//! - **Deep copies**: `clone` produces fully independent storage
//! - **Explicit cursors**: [`Iter`] and [`IterMut`] expose their position and
//!   report out-of-range dereference as an error
//!
//! # Example
//!
//! ```
//! use fixed_array::FixedArray;
//!
//! let mut a: FixedArray<i32, 3> = FixedArray::filled(5);
//! *a.get_mut(1)? = 9;
//!
//! let collected: Vec<i32> = a.iter().copied().collect();
//! assert_eq!(collected, [5, 9, 5]);
//!
//! // Out-of-range access is an error, not a panic.
//! assert!(a.get(3).is_err());
//!
//! // Clones are independent.
//! let mut b = a.clone();
//! *b.get_mut(0)? = 0;
//! assert_eq!(a.get(0)?, &5);
//! assert_eq!(b.get(0)?, &0);
//! # Ok::<(), fixed_array::IndexOutOfRange>(())
//! ```
//!
//! # Cursors
//!
//! [`Iter`] and [`IterMut`] are a borrow of the array plus a cursor in
//! `[0, N]`, where `N` is the one-past-end terminal position. Advancing never
//! checks bounds; dereferencing always does:
//!
//! ```
//! use fixed_array::FixedArray;
//!
//! let a: FixedArray<u8, 2> = FixedArray::filled(7);
//! let mut cur = a.iter();
//! assert_eq!(cur.get(), Ok(&7));
//! cur.advance();
//! cur.advance();
//! assert_eq!(cur, a.end());
//! assert!(cur.get().is_err()); // dereferencing the terminal position
//! ```
//!
//! Both cursor types also implement [`Iterator`], so `for` loops and iterator
//! adapters work as usual.
//!
//! # Gotchas
//!
//! - **No zero-capacity arrays**: `FixedArray<T, 0>` is rejected at compile
//!   time. A container that can never hold anything is a bug at the type
//!   level, not a runtime condition.
//! - **Cursor equality is per-array**: cursors compare equal only when they
//!   borrow the *same* array instance and sit at the same position. A cursor
//!   over one array never equals a cursor over another, even at the same
//!   position, so it is not a valid "has this traversal finished" check
//!   across arrays.
//! - **Single-threaded by design**: no locks, no atomicity across
//!   operations. `Send`/`Sync` fall out structurally from `T`.

#![no_std]

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::ops::{Index, IndexMut};
use core::ptr::{self, NonNull};

use thiserror::Error;

/// Error returned when an index or cursor position falls outside `[0, len)`.
///
/// Carries the offending index and the valid length so callers can report
/// the violation without extra context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} out of range for length {len}")]
pub struct IndexOutOfRange {
    /// The index that was attempted.
    pub index: usize,
    /// The number of valid positions.
    pub len: usize,
}

/// A fixed-capacity sequence container.
///
/// Owns exactly `N` elements of `T` for its entire lifetime. See the
/// [crate-level docs](crate) for an overview and examples.
#[derive(Debug, PartialEq, Eq)]
pub struct FixedArray<T, const N: usize> {
    items: [T; N],
}

impl<T, const N: usize> FixedArray<T, N> {
    /// Creates an array with every element set to `T::default()`.
    ///
    /// # Example
    ///
    /// ```
    /// use fixed_array::FixedArray;
    ///
    /// let a: FixedArray<u32, 4> = FixedArray::new();
    /// assert_eq!(a.as_slice(), &[0, 0, 0, 0]);
    /// ```
    ///
    /// Zero-capacity arrays do not compile:
    ///
    /// ```compile_fail
    /// use fixed_array::FixedArray;
    ///
    /// let empty: FixedArray<u32, 0> = FixedArray::new();
    /// ```
    pub fn new() -> Self
    where
        T: Default,
    {
        const { assert!(N > 0, "FixedArray capacity must be non-zero") }
        Self {
            items: core::array::from_fn(|_| T::default()),
        }
    }

    /// Creates an array with every element a clone of `value`.
    ///
    /// # Example
    ///
    /// ```
    /// use fixed_array::FixedArray;
    ///
    /// let a: FixedArray<i32, 3> = FixedArray::filled(5);
    /// assert_eq!(a.as_slice(), &[5, 5, 5]);
    /// ```
    pub fn filled(value: T) -> Self
    where
        T: Clone,
    {
        const { assert!(N > 0, "FixedArray capacity must be non-zero") }
        Self {
            items: core::array::from_fn(|_| value.clone()),
        }
    }

    /// The number of elements. Always `N`.
    pub const fn len(&self) -> usize {
        N
    }

    /// Always `false`; present for slice-API parity.
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// The fixed capacity `N`.
    pub const fn capacity() -> usize {
        N
    }

    /// Returns a reference to the element at `index`, or
    /// [`IndexOutOfRange`] if `index >= N`.
    ///
    /// A failed access leaves the array untouched.
    pub fn get(&self, index: usize) -> Result<&T, IndexOutOfRange> {
        let index = Self::check_index(index)?;
        Ok(&self.items[index])
    }

    /// Returns a mutable reference to the element at `index`, or
    /// [`IndexOutOfRange`] if `index >= N`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, IndexOutOfRange> {
        let index = Self::check_index(index)?;
        Ok(&mut self.items[index])
    }

    /// Views the elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Views the elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.items
    }

    /// Overwrites every element with a clone of `value`.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        self.items.fill(value);
    }

    /// Returns a read-only cursor positioned at index 0.
    ///
    /// Each call creates a fresh, independent cursor; multiple cursors over
    /// the same array are fine since none of them mutate shared state.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter {
            array: self,
            cursor: 0,
        }
    }

    /// Returns a read-only cursor positioned one past the last element.
    ///
    /// Useful as the terminal sentinel when driving an [`Iter`] by hand:
    ///
    /// ```
    /// use fixed_array::FixedArray;
    ///
    /// let a: FixedArray<u8, 3> = FixedArray::filled(1);
    /// let mut cur = a.iter();
    /// let mut seen = 0;
    /// while cur != a.end() {
    ///     seen += 1;
    ///     cur.advance();
    /// }
    /// assert_eq!(seen, 3);
    /// ```
    pub fn end(&self) -> Iter<'_, T, N> {
        Iter {
            array: self,
            cursor: N,
        }
    }

    /// Returns a mutable cursor positioned at index 0.
    ///
    /// The cursor borrows the array exclusively for its lifetime.
    pub fn iter_mut(&mut self) -> IterMut<'_, T, N> {
        IterMut {
            base: NonNull::from(&mut self.items).cast(),
            cursor: 0,
            marker: PhantomData,
        }
    }

    /// The single bounds-check gate used by indexed access and by cursor
    /// dereference.
    const fn check_index(index: usize) -> Result<usize, IndexOutOfRange> {
        if index < N {
            Ok(index)
        } else {
            Err(IndexOutOfRange { index, len: N })
        }
    }
}

impl<T: Default, const N: usize> Default for FixedArray<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> From<[T; N]> for FixedArray<T, N> {
    /// Adopts an existing array by value.
    fn from(items: [T; N]) -> Self {
        const { assert!(N > 0, "FixedArray capacity must be non-zero") }
        Self { items }
    }
}

impl<T: Clone, const N: usize> Clone for FixedArray<T, N> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
        }
    }

    /// Replaces `self`'s contents with a deep copy of `source`.
    ///
    /// The replacement block is built in full before the old contents are
    /// released: if cloning an element panics midway, `self` still holds its
    /// original elements.
    fn clone_from(&mut self, source: &Self) {
        self.items = source.items.clone();
    }
}

impl<T, const N: usize> Index<usize> for FixedArray<T, N> {
    type Output = T;

    /// Panicking counterpart of [`FixedArray::get`], matching the slice
    /// indexing contract.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(item) => item,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T, const N: usize> IndexMut<usize> for FixedArray<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(item) => item,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T, const N: usize> AsRef<[T]> for FixedArray<T, N> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, const N: usize> AsMut<[T]> for FixedArray<T, N> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedArray<T, N> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, N>;

    fn into_iter(self) -> Iter<'a, T, N> {
        self.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut FixedArray<T, N> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, N>;

    fn into_iter(self) -> IterMut<'a, T, N> {
        self.iter_mut()
    }
}

/// A read-only cursor over a [`FixedArray`].
///
/// Holds a borrow of the array plus a position in `[0, N]`, where `N` is the
/// one-past-end terminal position. [`advance`](Iter::advance) never checks
/// bounds; [`get`](Iter::get) always does. `Iter` is `Copy`, so the
/// "remember where I was, then step" pattern is a plain copy:
///
/// ```
/// use fixed_array::FixedArray;
///
/// let a: FixedArray<u8, 2> = FixedArray::filled(3);
/// let mut cur = a.iter();
/// let before = cur; // state prior to the step
/// cur.advance();
/// assert_eq!(before.position(), 0);
/// assert_eq!(cur.position(), 1);
/// ```
pub struct Iter<'a, T, const N: usize> {
    array: &'a FixedArray<T, N>,
    cursor: usize,
}

static_assertions::assert_eq_size!(Iter<'static, u8, 4>, [usize; 2]);
static_assertions::assert_eq_size!(IterMut<'static, u8, 4>, [usize; 2]);

impl<'a, T, const N: usize> Iter<'a, T, N> {
    /// Returns the element at the cursor, or [`IndexOutOfRange`] if the
    /// cursor sits at or past the terminal position.
    pub fn get(&self) -> Result<&'a T, IndexOutOfRange> {
        let index = FixedArray::<T, N>::check_index(self.cursor)?;
        Ok(&self.array.items[index])
    }

    /// Moves the cursor one position forward, unconditionally.
    ///
    /// No bounds check happens here; advancing past the terminal position is
    /// allowed, and only a subsequent [`get`](Iter::get) reports the error.
    pub fn advance(&mut self) {
        self.cursor += 1;
    }

    /// The current cursor position, in `[0, N]` under normal use.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Whether the cursor sits at or past the terminal position.
    pub fn at_end(&self) -> bool {
        self.cursor >= N
    }
}

impl<T, const N: usize> Clone for Iter<'_, T, N> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T, const N: usize> Copy for Iter<'_, T, N> {}

impl<T, const N: usize> fmt::Debug for Iter<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

/// State-based equality: same array instance (by address) and same cursor.
impl<T, const N: usize> PartialEq for Iter<'_, T, N> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.array, other.array) && self.cursor == other.cursor
    }
}
impl<T, const N: usize> Eq for Iter<'_, T, N> {}

impl<T, const N: usize> PartialEq<IterMut<'_, T, N>> for Iter<'_, T, N> {
    fn eq(&self, other: &IterMut<'_, T, N>) -> bool {
        ptr::eq(self.array.items.as_ptr(), other.base.as_ptr()) && self.cursor == other.cursor
    }
}

impl<'a, T, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let item = self.array.items.get(self.cursor)?;
        self.cursor += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = N.saturating_sub(self.cursor);
        (remaining, Some(remaining))
    }
}

impl<T, const N: usize> ExactSizeIterator for Iter<'_, T, N> {}
impl<T, const N: usize> FusedIterator for Iter<'_, T, N> {}

/// A mutable cursor over a [`FixedArray`].
///
/// Same shape as [`Iter`]: a borrow of the array plus a position in
/// `[0, N]`. The borrow is exclusive, so while an `IterMut` is alive no
/// other access to the array exists. Dereference comes in both flavors:
/// [`get`](IterMut::get) for reading and [`get_mut`](IterMut::get_mut) for
/// writing through the cursor.
///
/// Internally the exclusive borrow is held as a pointer to the element
/// block, captured once when the cursor is created, so every element the
/// cursor hands out shares that one provenance.
pub struct IterMut<'a, T, const N: usize> {
    base: NonNull<T>,
    cursor: usize,
    marker: PhantomData<&'a mut FixedArray<T, N>>,
}

// Important: use correct semantics for references.
unsafe impl<T: Send, const N: usize> Send for IterMut<'_, T, N> {}
unsafe impl<T: Sync, const N: usize> Sync for IterMut<'_, T, N> {}

impl<T, const N: usize> IterMut<'_, T, N> {
    /// Returns the element at the cursor, or [`IndexOutOfRange`] if the
    /// cursor sits at or past the terminal position.
    pub fn get(&self) -> Result<&T, IndexOutOfRange> {
        let index = FixedArray::<T, N>::check_index(self.cursor)?;
        // SAFETY: index < N, and base points at the N-element block the
        // cursor borrows exclusively for 'a.
        Ok(unsafe { self.base.add(index).as_ref() })
    }

    /// Returns a writable reference to the element at the cursor, or
    /// [`IndexOutOfRange`] if the cursor sits at or past the terminal
    /// position.
    ///
    /// ```
    /// use fixed_array::FixedArray;
    ///
    /// let mut a: FixedArray<i32, 2> = FixedArray::filled(1);
    /// let mut cur = a.iter_mut();
    /// *cur.get_mut()? = 10;
    /// assert_eq!(a.as_slice(), &[10, 1]);
    /// # Ok::<(), fixed_array::IndexOutOfRange>(())
    /// ```
    pub fn get_mut(&mut self) -> Result<&mut T, IndexOutOfRange> {
        let index = FixedArray::<T, N>::check_index(self.cursor)?;
        // SAFETY: index < N; the returned borrow is tied to `&mut self`, so
        // it cannot coexist with anything else the cursor hands out.
        Ok(unsafe { self.base.add(index).as_mut() })
    }

    /// Moves the cursor one position forward, unconditionally.
    pub fn advance(&mut self) {
        self.cursor += 1;
    }

    /// The current cursor position, in `[0, N]` under normal use.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Whether the cursor sits at or past the terminal position.
    pub fn at_end(&self) -> bool {
        self.cursor >= N
    }
}

impl<T, const N: usize> fmt::Debug for IterMut<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

/// State-based equality, the same rule as [`Iter`].
impl<T, const N: usize> PartialEq for IterMut<'_, T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.cursor == other.cursor
    }
}
impl<T, const N: usize> Eq for IterMut<'_, T, N> {}

impl<T, const N: usize> PartialEq<Iter<'_, T, N>> for IterMut<'_, T, N> {
    fn eq(&self, other: &Iter<'_, T, N>) -> bool {
        ptr::eq(self.base.as_ptr(), other.array.items.as_ptr()) && self.cursor == other.cursor
    }
}

impl<'a, T, const N: usize> Iterator for IterMut<'a, T, N> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.cursor >= N {
            return None;
        }
        let index = self.cursor;
        self.cursor += 1;
        // SAFETY: index < N, and every yield derives from the one base
        // pointer captured when the cursor was created. The cursor only
        // moves forward, so each element is handed out at most once and the
        // yielded references never alias; the exclusive borrow of the array
        // lives for 'a.
        unsafe { Some(self.base.add(index).as_mut()) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = N.saturating_sub(self.cursor);
        (remaining, Some(remaining))
    }
}

impl<T, const N: usize> ExactSizeIterator for IterMut<'_, T, N> {}
impl<T, const N: usize> FusedIterator for IterMut<'_, T, N> {}
