//! The scope stack: a persistent arena of ribs plus a cursor tracking the
//! currently active one. Ribs are never removed once pushed — exiting a
//! scope only moves the cursor back to the parent, so symbols inserted
//! during parsing stay reachable by id for the TAC and assembly phases.

use crate::entry::SymbolId;
use pscc_util::{FxHashMap, IndexVec, Symbol};

pscc_util::define_idx!(RibId);

pub struct Rib {
    pub parent: Option<RibId>,
    pub depth: u32,
    bindings: FxHashMap<Symbol, SymbolId>,
    /// Next offset to assign to a local declared in this rib.
    pub next_local_offset: i32,
}

impl Rib {
    fn root() -> Self {
        Self {
            parent: None,
            depth: 0,
            bindings: FxHashMap::default(),
            next_local_offset: -2,
        }
    }

    fn child(parent: RibId, depth: u32) -> Self {
        Self {
            parent: Some(parent),
            depth,
            bindings: FxHashMap::default(),
            next_local_offset: -2,
        }
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&Symbol, &SymbolId)> {
        self.bindings.iter()
    }
}

pub struct ScopeTree {
    pub(crate) ribs: IndexVec<RibId, Rib>,
    pub(crate) current: RibId,
}

impl ScopeTree {
    pub fn new() -> Self {
        let mut ribs = IndexVec::new();
        let root = ribs.push(Rib::root());
        Self { ribs, current: root }
    }

    pub fn current(&self) -> RibId {
        self.current
    }

    pub fn depth(&self, rib: RibId) -> u32 {
        self.ribs[rib].depth
    }

    /// Push a new scope one level deeper than the current one and make it
    /// active. Returns the new scope's id.
    pub fn enter_scope(&mut self) -> RibId {
        let depth = self.ribs[self.current].depth + 1;
        let new_rib = self.ribs.push(Rib::child(self.current, depth));
        self.current = new_rib;
        new_rib
    }

    /// Move the active cursor back to the parent of the current scope,
    /// returning the id of the scope being left so its bindings can still
    /// be inspected (e.g. for logging).
    pub fn exit_scope(&mut self) -> RibId {
        let leaving = self.current;
        if let Some(parent) = self.ribs[leaving].parent {
            self.current = parent;
        }
        leaving
    }

    pub fn bind(&mut self, rib: RibId, name: Symbol, id: SymbolId) -> bool {
        self.ribs[rib].bindings.insert(name, id).is_none()
    }

    pub fn contains_in(&self, rib: RibId, name: Symbol) -> bool {
        self.ribs[rib].bindings.contains_key(&name)
    }

    pub fn resolve(&self, from: RibId, name: Symbol) -> Option<SymbolId> {
        let mut rib_id = from;
        loop {
            let rib = &self.ribs[rib_id];
            if let Some(&id) = rib.bindings.get(&name) {
                return Some(id);
            }
            match rib.parent {
                Some(parent) => rib_id = parent,
                None => return None,
            }
        }
    }

    pub fn rib(&self, id: RibId) -> &Rib {
        &self.ribs[id]
    }

    pub fn rib_mut(&mut self, id: RibId) -> &mut Rib {
        &mut self.ribs[id]
    }
}

impl Default for ScopeTree {
    fn default() -> Self {
        Self::new()
    }
}
