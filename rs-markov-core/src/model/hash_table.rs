use std::fmt;

use log::warn;
use rand::Rng;
use rand::seq::IteratorRandom;
use serde::Serialize;

use crate::error::{MarkovError, Result};

/// An occupied slot: a key and every value stored under it, in insertion order.
///
/// ## Invariants
/// - `values` is never empty
#[derive(Clone, Debug)]
struct Slot<V> {
	key: String,
	values: Vec<V>,
}

/// Outcome of walking the probe sequence for a key.
enum Probe {
	/// Slot index holding the key.
	Found(usize),
	/// First empty slot met before the key.
	Vacant(usize),
	/// Every slot is occupied by another key.
	Exhausted,
}

/// Occupancy summary of a table.
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
pub struct TableStats {
	pub capacity: usize,
	pub occupied: usize,
	pub values: usize,
	pub load_factor: f64,
}

/// Fixed-capacity hashtable mapping string keys to lists of values.
///
/// Collisions are resolved with linear probing that walks **backward**:
/// from the base slot `b` the sequence is `b, b-1, b-2, ...` wrapping
/// around modulo the capacity. Insertion and lookup share the exact same
/// sequence, so a key is always found where it was placed.
///
/// The table never grows. Inserting a new key into a table with no empty
/// slot fails with [`MarkovError::TableFull`].
///
/// # Invariants
/// - `len() <= capacity()`
/// - A key occupies at most one slot
/// - Every stored key has at least one value
/// - Placement depends only on the key and the capacity
#[derive(Clone, Debug)]
pub struct FixedHashTable<V = String> {
	slots: Vec<Option<Slot<V>>>,
	occupied: usize,
}

/// Polynomial string hash `h = 31*h + c` over the key's code points,
/// reduced modulo `capacity`.
///
/// The reduction is applied at every step, which gives the same result as
/// reducing the unbounded polynomial once at the end.
pub fn hash_index(key: &str, capacity: usize) -> usize {
	let modulus = capacity as u128;
	key.chars().fold(0u128, |h, c| (31 * h + c as u128) % modulus) as usize
}

impl<V> FixedHashTable<V> {
	/// Creates an empty table with `capacity` slots.
	///
	/// # Errors
	/// Returns [`MarkovError::InvalidCapacity`] if `capacity` is zero.
	pub fn with_capacity(capacity: usize) -> Result<Self> {
		if capacity == 0 {
			return Err(MarkovError::InvalidCapacity);
		}
		let mut slots = Vec::with_capacity(capacity);
		slots.resize_with(capacity, || None);
		Ok(Self { slots, occupied: 0 })
	}

	pub fn capacity(&self) -> usize {
		self.slots.len()
	}

	/// Number of distinct keys stored.
	pub fn len(&self) -> usize {
		self.occupied
	}

	pub fn is_empty(&self) -> bool {
		self.occupied == 0
	}

	pub fn load_factor(&self) -> f64 {
		self.occupied as f64 / self.capacity() as f64
	}

	pub fn stats(&self) -> TableStats {
		TableStats {
			capacity: self.capacity(),
			occupied: self.occupied,
			values: self.iter().map(|(_, values)| values.len()).sum(),
			load_factor: self.load_factor(),
		}
	}

	/// Slot index preceding `index`, wrapping from 0 to the last slot.
	fn previous(&self, index: usize) -> usize {
		(index + self.capacity() - 1) % self.capacity()
	}

	fn probe(&self, key: &str) -> Probe {
		let mut index = hash_index(key, self.capacity());
		for _ in 0..self.capacity() {
			match &self.slots[index] {
				None => return Probe::Vacant(index),
				Some(slot) if slot.key == key => return Probe::Found(index),
				Some(_) => index = self.previous(index),
			}
		}
		Probe::Exhausted
	}

	/// Appends `value` to the list stored under `key`, creating the entry if needed.
	///
	/// # Errors
	/// Returns [`MarkovError::TableFull`] when `key` is new and no slot is free.
	/// The table is left unchanged in that case.
	pub fn put(&mut self, key: &str, value: V) -> Result<()> {
		match self.probe(key) {
			Probe::Found(index) => {
				// Should not fail, the probe just saw this slot occupied
				if let Some(slot) = self.slots[index].as_mut() {
					slot.values.push(value);
				}
			}
			Probe::Vacant(index) => {
				self.slots[index] = Some(Slot { key: key.to_owned(), values: vec![value] });
				self.occupied += 1;
				// Warn once, on the insertion that crosses 90%
				let threshold = self.capacity() * 9;
				if self.occupied * 10 >= threshold && (self.occupied - 1) * 10 < threshold {
					warn!("hashtable is {}/{} full, consider a larger capacity", self.occupied, self.capacity());
				}
			}
			Probe::Exhausted => return Err(MarkovError::TableFull { capacity: self.capacity() }),
		}
		Ok(())
	}

	/// Returns every value stored under `key`, in insertion order.
	///
	/// Returns `None` if the key is absent.
	pub fn get(&self, key: &str) -> Option<&[V]> {
		match self.probe(key) {
			Probe::Found(index) => self.slots[index].as_ref().map(|slot| slot.values.as_slice()),
			_ => None,
		}
	}

	pub fn contains(&self, key: &str) -> bool {
		matches!(self.probe(key), Probe::Found(_))
	}

	/// Slot index where `key` is stored, if present.
	pub fn position(&self, key: &str) -> Option<usize> {
		match self.probe(key) {
			Probe::Found(index) => Some(index),
			_ => None,
		}
	}

	/// Iterates over stored entries in slot order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[V])> {
		self.slots
			.iter()
			.flatten()
			.map(|slot| (slot.key.as_str(), slot.values.as_slice()))
	}

	/// Iterates over stored keys in slot order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.iter().map(|(key, _)| key)
	}

	/// Picks a stored key uniformly at random.
	///
	/// Returns `None` if the table is empty.
	pub fn random_key<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		self.keys().choose(rng)
	}
}

impl<V: fmt::Display> fmt::Display for FixedHashTable<V> {
	/// Dumps every slot: `_` for empty, `key: [v1, v2]` for occupied.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "[")?;
		for (i, slot) in self.slots.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			match slot {
				None => write!(f, "_")?,
				Some(slot) => {
					write!(f, "{}: [", slot.key)?;
					for (j, value) in slot.values.iter().enumerate() {
						if j > 0 {
							write!(f, ", ")?;
						}
						write!(f, "{}", value)?;
					}
					write!(f, "]")?;
				}
			}
		}
		write!(f, "]")
	}
}
