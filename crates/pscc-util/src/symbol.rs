//! String interning.
//!
//! A [`Symbol`] is a compact handle to a string stored in a process-wide
//! table. Interning turns repeated identifier/keyword comparisons (which
//! happen constantly across lexing, parsing, and symbol-table lookups) into
//! `u32` comparisons instead of byte-by-byte `str` comparisons.
//!
//! The compiler this crate supports runs strictly single-threaded, so —
//! unlike the multi-threaded `DashMap`+`ahash` interner this is modeled
//! on — the table here is a plain `RefCell<FxHashMap<..>>` behind a
//! `thread_local!`. No locking, no atomics.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;

thread_local! {
    static TABLE: RefCell<Interner> = RefCell::new(Interner::new());
}

struct Interner {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

impl Interner {
    fn new() -> Self {
        Self {
            map: FxHashMap::default(),
            strings: Vec::new(),
        }
    }

    fn intern(&mut self, s: &str) -> u32 {
        if let Some(&id) = self.map.get(s) {
            return id;
        }
        let leaked: &'static str = Box::leak(s.to_string().into_boxed_str());
        let id = self.strings.len() as u32;
        self.strings.push(leaked);
        self.map.insert(leaked, id);
        id
    }

    fn resolve(&self, id: u32) -> &'static str {
        self.strings[id as usize]
    }
}

/// An interned string.
///
/// Two `Symbol`s compare equal exactly when the strings they were interned
/// from compare equal (byte-for-byte). Case folding is the caller's
/// responsibility: intern the folded and unfolded forms separately when
/// both are needed (the symbol table does this for canonical names).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Intern `s`, returning a handle that compares equal to every other
    /// handle interned from an identical string.
    pub fn intern(s: &str) -> Self {
        TABLE.with(|t| Symbol(t.borrow_mut().intern(s)))
    }

    /// The original string this symbol was interned from.
    pub fn as_str(self) -> &'static str {
        TABLE.with(|t| t.borrow().resolve(self.0))
    }

    /// Intern the case-folded (lowercase) form of `s`. Used for canonical
    /// symbol-table keys, where the source language's keyword/identifier
    /// comparisons are case-insensitive but the original casing must be
    /// preserved separately for diagnostics and emission.
    pub fn intern_folded(s: &str) -> Self {
        Self::intern(&s.to_ascii_lowercase())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
