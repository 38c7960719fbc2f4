//! Generational slot-map used by every set of this crate.
//!
//! Slots are recycled through a free list. Every removal (and every [`HandleTable::clear`])
//! bumps the table's generation, so an [`Index`] handed out before the removal can never
//! resolve to the value that later reuses its slot.
use std::mem;
use std::ops;

/// The `HandleTable` allows inserting and removing elements that are referred to by
/// an [`Index`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct HandleTable<T> {
    items: Vec<Entry<T>>,
    generation: u32,
    free_list_head: Option<u32>,
    len: usize,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
enum Entry<T> {
    Free { next_free: Option<u32> },
    Occupied { generation: u32, value: T },
}

/// An index (and generation) into a `HandleTable`.
///
/// To get an `Index`, insert an element into a `HandleTable`, and the `Index` for
/// that element will be returned.
///
/// # Examples
///
/// ```ignore
/// use rapier_joints::data::HandleTable;
///
/// let mut table = HandleTable::new();
/// let idx = table.insert(123);
/// assert_eq!(table[idx], 123);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct Index {
    index: u32,
    generation: u32,
}

impl Index {
    /// Create a new `Index` from its raw parts.
    ///
    /// Arbitrary parts are allowed: an `Index` that was never handed out by a table
    /// simply fails to resolve.
    pub fn from_raw_parts(index: u32, generation: u32) -> Index {
        Index { index, generation }
    }

    /// Convert this `Index` into its raw parts.
    pub fn into_raw_parts(self) -> (u32, u32) {
        (self.index, self.generation)
    }

    /// An always-invalid index.
    pub fn invalid() -> Index {
        Self::from_raw_parts(crate::INVALID_U32, crate::INVALID_U32)
    }
}

const DEFAULT_CAPACITY: usize = 4;

impl<T> Default for HandleTable<T> {
    fn default() -> HandleTable<T> {
        HandleTable::new()
    }
}

impl<T> HandleTable<T> {
    /// Constructs a new, empty `HandleTable`.
    pub fn new() -> HandleTable<T> {
        HandleTable::with_capacity(DEFAULT_CAPACITY)
    }

    /// Constructs a new, empty `HandleTable<T>` able to hold `n` elements without
    /// further allocation.
    pub fn with_capacity(n: usize) -> HandleTable<T> {
        let mut table = HandleTable {
            items: Vec::new(),
            generation: 0,
            free_list_head: None,
            len: 0,
        };
        table.reserve(n.max(1));
        table
    }

    /// Removes every element of the table, but keeps its allocation.
    ///
    /// All the indices obtained before this call become permanently invalid.
    pub fn clear(&mut self) {
        self.items.clear();

        let end = self.items.capacity() as u32;
        self.items.extend((0..end).map(|i| {
            if i == end - 1 {
                Entry::Free { next_free: None }
            } else {
                Entry::Free {
                    next_free: Some(i + 1),
                }
            }
        }));
        self.free_list_head = if end == 0 { None } else { Some(0) };
        self.generation = self.generation.wrapping_add(1);
        self.len = 0;
    }

    #[inline]
    fn try_alloc_next_index(&mut self) -> Option<Index> {
        let i = self.free_list_head?;
        match self.items[i as usize] {
            Entry::Free { next_free } => {
                self.free_list_head = next_free;
                self.len += 1;
                Some(Index {
                    index: i,
                    generation: self.generation,
                })
            }
            Entry::Occupied { .. } => unreachable!("corrupt free list"),
        }
    }

    /// Insert `value` into the table, allocating more capacity if necessary.
    ///
    /// The `value`'s associated index in the table is returned.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use rapier_joints::data::HandleTable;
    ///
    /// let mut table = HandleTable::new();
    ///
    /// let idx = table.insert(42);
    /// assert_eq!(table[idx], 42);
    /// ```
    pub fn insert(&mut self, value: T) -> Index {
        self.insert_with(|_| value)
    }

    /// Insert the value returned by `create` into the table, allocating more capacity if
    /// necessary. `create` is called with the new value's index, allowing values that know
    /// their own index.
    pub fn insert_with(&mut self, create: impl FnOnce(Index) -> T) -> Index {
        let index = match self.try_alloc_next_index() {
            Some(index) => index,
            None => {
                let len = self.items.len();
                self.reserve(len.max(1));
                // The free list can't be empty right after reserving.
                match self.try_alloc_next_index() {
                    Some(index) => index,
                    None => unreachable!("the free list is empty after a reservation"),
                }
            }
        };

        self.items[index.index as usize] = Entry::Occupied {
            generation: index.generation,
            value: create(index),
        };
        index
    }

    /// Remove the element at index `i` from the table.
    ///
    /// If the element at index `i` is still in the table, then it is
    /// returned. If it is not in the table, then `None` is returned.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// use rapier_joints::data::HandleTable;
    ///
    /// let mut table = HandleTable::new();
    /// let idx = table.insert(42);
    ///
    /// assert_eq!(table.remove(idx), Some(42));
    /// assert_eq!(table.remove(idx), None);
    /// ```
    pub fn remove(&mut self, i: Index) -> Option<T> {
        match self.items.get(i.index as usize) {
            Some(Entry::Occupied { generation, .. }) if *generation == i.generation => {}
            _ => return None,
        }

        let entry = mem::replace(
            &mut self.items[i.index as usize],
            Entry::Free {
                next_free: self.free_list_head,
            },
        );
        self.generation = self.generation.wrapping_add(1);
        self.free_list_head = Some(i.index);
        self.len -= 1;

        match entry {
            Entry::Occupied { value, .. } => Some(value),
            Entry::Free { .. } => unreachable!(),
        }
    }

    /// Is the element at index `i` in the table?
    pub fn contains(&self, i: Index) -> bool {
        self.get(i).is_some()
    }

    /// Get a shared reference to the element at index `i` if it is in the table.
    ///
    /// Stale, freed, and out-of-range indices all yield `None`.
    pub fn get(&self, i: Index) -> Option<&T> {
        match self.items.get(i.index as usize) {
            Some(Entry::Occupied { generation, value }) if *generation == i.generation => {
                Some(value)
            }
            _ => None,
        }
    }

    /// Get an exclusive reference to the element at index `i` if it is in the table.
    pub fn get_mut(&mut self, i: Index) -> Option<&mut T> {
        match self.items.get_mut(i.index as usize) {
            Some(Entry::Occupied { generation, value }) if *generation == i.generation => {
                Some(value)
            }
            _ => None,
        }
    }

    /// Gets the element at slot `i`, whatever its generation, together with its full index.
    ///
    /// This is useful when only the slot number crossed a boundary. It suffers from the ABA
    /// problem, so prefer [`HandleTable::get`] whenever the generation is known.
    pub fn get_unknown_gen(&self, i: u32) -> Option<(&T, Index)> {
        match self.items.get(i as usize) {
            Some(Entry::Occupied { generation, value }) => Some((
                value,
                Index {
                    index: i,
                    generation: *generation,
                },
            )),
            _ => None,
        }
    }

    /// The number of elements in this table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of elements this table can hold without further allocation.
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Allocate space for `additional_capacity` more elements in the table.
    pub fn reserve(&mut self, additional_capacity: usize) {
        if additional_capacity == 0 {
            return;
        }

        let start = self.items.len();
        let end = start + additional_capacity;
        let old_head = self.free_list_head;
        self.items.reserve_exact(additional_capacity);
        self.items.extend((start..end).map(|i| {
            if i == end - 1 {
                Entry::Free {
                    next_free: old_head,
                }
            } else {
                Entry::Free {
                    next_free: Some(i as u32 + 1),
                }
            }
        }));
        self.free_list_head = Some(start as u32);
    }

    /// Iterate over shared references to the elements in this table.
    ///
    /// Elements are yielded in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Index, &T)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| match entry {
                Entry::Occupied { generation, value } => Some((
                    Index {
                        index: i as u32,
                        generation: *generation,
                    },
                    value,
                )),
                Entry::Free { .. } => None,
            })
    }

    /// Iterate over exclusive references to the elements in this table.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Index, &mut T)> {
        self.items
            .iter_mut()
            .enumerate()
            .filter_map(|(i, entry)| match entry {
                Entry::Occupied { generation, value } => Some((
                    Index {
                        index: i as u32,
                        generation: *generation,
                    },
                    value,
                )),
                Entry::Free { .. } => None,
            })
    }
}

impl<T> ops::Index<Index> for HandleTable<T> {
    type Output = T;

    fn index(&self, index: Index) -> &Self::Output {
        self.get(index).expect("No element at index")
    }
}

impl<T> ops::IndexMut<Index> for HandleTable<T> {
    fn index_mut(&mut self, index: Index) -> &mut Self::Output {
        self.get_mut(index).expect("No element at index")
    }
}
