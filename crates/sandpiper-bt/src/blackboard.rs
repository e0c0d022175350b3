use std::any::Any;
use std::collections::BTreeMap;
use std::marker::PhantomData;

/// Typed handle into the blackboard.
///
/// The id must be unique across the process; the name is carried for logs and
/// access-declaration introspection only.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BbKey<T: 'static> {
    id: u64,
    name: &'static str,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: 'static> Copy for BbKey<T> {}

impl<T: 'static> Clone for BbKey<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> BbKey<T> {
    pub const fn new(id: u64, name: &'static str) -> Self {
        Self {
            id,
            name,
            _phantom: PhantomData,
        }
    }

    pub fn id(self) -> u64 {
        self.id
    }

    pub fn name(self) -> &'static str {
        self.name
    }
}

/// Shared key-value state for inter-node communication.
///
/// Entries are written every tick by producer nodes and consumed same-tick or
/// later by readers. A key that was never written reads as `None`; readers
/// are expected to surface that as `Status::Failure`, never a panic, so
/// sibling branches can still attempt fallbacks.
#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<u64, Box<dyn Any + Send>>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.values.contains_key(&key.id)
    }

    pub fn set<T: Send + 'static>(&mut self, key: BbKey<T>, value: T) {
        self.values.insert(key.id, Box::new(value));
    }

    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Option<&T> {
        let value = self.values.get(&key.id)?;
        value.downcast_ref::<T>().or_else(|| {
            panic!(
                "blackboard type mismatch for key {:?} (id={})",
                key.name, key.id
            )
        })
    }

    pub fn get_mut<T: 'static>(&mut self, key: BbKey<T>) -> Option<&mut T> {
        let value = self.values.get_mut(&key.id)?;
        value.downcast_mut::<T>().or_else(|| {
            panic!(
                "blackboard type mismatch for key {:?} (id={})",
                key.name, key.id
            )
        })
    }

    pub fn remove<T: 'static>(&mut self, key: BbKey<T>) -> Option<T> {
        let value = self.values.remove(&key.id)?;
        value.downcast::<T>().map(|boxed| *boxed).ok().or_else(|| {
            panic!(
                "blackboard type mismatch for key {:?} (id={})",
                key.name, key.id
            )
        })
    }

    /// Read-only view restricted to a declared key id set.
    pub fn view<'a>(&'a self, allowed: &'a [u64]) -> BbView<'a> {
        BbView {
            blackboard: self,
            allowed,
        }
    }
}

/// Read-only blackboard view handed to guard conditions.
///
/// Reads of keys outside the declared set return `None`, which keeps guard
/// conditions honest about their data dependencies: an undeclared read looks
/// exactly like a missing key and fails closed.
#[derive(Clone, Copy)]
pub struct BbView<'a> {
    blackboard: &'a Blackboard,
    allowed: &'a [u64],
}

impl<'a> BbView<'a> {
    pub fn get<T: 'static>(&self, key: BbKey<T>) -> Option<&'a T> {
        if !self.allowed.contains(&key.id()) {
            return None;
        }
        self.blackboard.get(key)
    }

    pub fn contains<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.allowed.contains(&key.id()) && self.blackboard.contains(key)
    }
}

/// Advisory declaration of the keys a node reads and writes.
///
/// Not an enforced capability token: the declarations exist so tests and
/// tooling can check data dependency order between producers and consumers.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AccessDecl {
    reads: Vec<(u64, &'static str)>,
    writes: Vec<(u64, &'static str)>,
}

impl AccessDecl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read<T: 'static>(mut self, key: BbKey<T>) -> Self {
        self.reads.push((key.id(), key.name()));
        self
    }

    pub fn write<T: 'static>(mut self, key: BbKey<T>) -> Self {
        self.writes.push((key.id(), key.name()));
        self
    }

    pub fn reads<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.reads.iter().any(|(id, _)| *id == key.id())
    }

    pub fn writes<T: 'static>(&self, key: BbKey<T>) -> bool {
        self.writes.iter().any(|(id, _)| *id == key.id())
    }

    pub fn read_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.reads.iter().map(|(id, _)| *id)
    }

    pub fn write_ids(&self) -> impl Iterator<Item = u64> + '_ {
        self.writes.iter().map(|(id, _)| *id)
    }
}
