//! Cache of derived private-key values keyed on `(P, N, E)`
//!
//! Reconstructing `Q` and `D` from a stored prime costs a division and a
//! modular inversion at full key size. The cache keeps the last
//! [`EXP_D_CACHE_SIZE`] results. Entries carry a relative age: `0` is the
//! most recently used, and the ages of all entries always form the dense
//! sequence `0..len`. Eviction removes the entry with the largest age.
//!
//! A lookup hit is only a hint; callers check `P * Q == N` before trusting it.

use log::{debug, trace};
use tpm2crypt_common::SecretVec;
use tpm2crypt_internal::constant_time::ct_eq;
use tpm2crypt_params::traditional::rsa::EXP_D_CACHE_SIZE;

struct Entry {
    age: usize,
    p: SecretVec,
    n: Vec<u8>,
    e: u32,
    q: SecretVec,
    d: SecretVec,
}

impl Entry {
    fn matches(&self, p: &[u8], n: &[u8], e: u32) -> bool {
        self.e == e && self.n == n && ct_eq(&self.p, p)
    }
}

/// Fixed-size LRU table of `(Q, D)` per `(P, N, E)`
pub struct ExpDCache {
    entries: Vec<Entry>,
    capacity: usize,
}

impl Default for ExpDCache {
    fn default() -> Self {
        Self::new()
    }
}

fn strip(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}

impl ExpDCache {
    /// Empty cache with the default number of slots
    pub fn new() -> Self {
        Self::with_capacity(EXP_D_CACHE_SIZE)
    }

    /// Empty cache with `capacity` slots (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Move entry `idx` to age 0; entries that were younger age by one
    fn touch(&mut self, idx: usize) {
        let old = self.entries[idx].age;
        for entry in self.entries.iter_mut() {
            if entry.age < old {
                entry.age += 1;
            }
        }
        self.entries[idx].age = 0;
    }

    /// Look up `(Q, D)` and mark the entry most recently used
    pub fn find(&mut self, p: &[u8], n: &[u8], e: u32) -> Option<(SecretVec, SecretVec)> {
        let (p, n) = (strip(p), strip(n));
        match self.entries.iter().position(|entry| entry.matches(p, n, e)) {
            Some(idx) => {
                trace!("exponent cache hit (age {})", self.entries[idx].age);
                self.touch(idx);
                let entry = &self.entries[idx];
                Some((entry.q.clone(), entry.d.clone()))
            }
            None => {
                trace!("exponent cache miss");
                None
            }
        }
    }

    /// Insert `(Q, D)` as the most recently used entry
    ///
    /// An existing entry for the same key is replaced in place. When the
    /// table is full the oldest entry is dropped.
    pub fn add(&mut self, p: &[u8], n: &[u8], e: u32, q: &[u8], d: &[u8]) {
        let (p, n) = (strip(p), strip(n));
        if let Some(idx) = self.entries.iter().position(|entry| entry.matches(p, n, e)) {
            self.entries[idx].q = SecretVec::from_slice(q);
            self.entries[idx].d = SecretVec::from_slice(d);
            self.touch(idx);
            return;
        }
        if self.entries.len() == self.capacity {
            if let Some(oldest) = self
                .entries
                .iter()
                .enumerate()
                .max_by_key(|(_, entry)| entry.age)
                .map(|(i, _)| i)
            {
                debug!("exponent cache full, evicting entry of age {}", self.entries[oldest].age);
                self.entries.swap_remove(oldest);
            }
        }
        for entry in self.entries.iter_mut() {
            entry.age += 1;
        }
        self.entries.push(Entry {
            age: 0,
            p: SecretVec::from_slice(p),
            n: n.to_vec(),
            e,
            q: SecretVec::from_slice(q),
            d: SecretVec::from_slice(d),
        });
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl core::fmt::Debug for ExpDCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExpDCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
