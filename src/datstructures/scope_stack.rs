use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ScopeError {
    #[error("The stack is not deep enough")]
    StackNotDeepEnough,

    #[error("The name is already bound in the current scope")]
    AlreadyDeclared,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub usize);

#[derive(Clone, Debug)]
pub struct Scope<K, V> {
    id: ScopeId,
    entries: HashMap<K, V>,
}

impl<K: Eq + Hash, V> Scope<K, V> {
    fn new(id: ScopeId) -> Self {
        Scope {
            id,
            entries: HashMap::new(),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

}

/// Chain of nested scopes. Every scope in `nested` is the child of the one
/// before it; the first one is a child of `root`. The root is never popped.
#[derive(Clone, Debug)]
pub struct ScopeStack<K, V> {
    root: Scope<K, V>,
    nested: Vec<Scope<K, V>>,
    next_id: usize,
}

impl<K: Eq + Hash, V> Default for ScopeStack<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> ScopeStack<K, V> {
    pub fn new() -> Self {
        ScopeStack {
            root: Scope::new(ScopeId(0)),
            nested: Vec::new(),
            next_id: 1,
        }
    }

    pub fn push(&mut self) -> ScopeId {
        let id = ScopeId(self.next_id);
        self.next_id += 1;
        self.nested.push(Scope::new(id));

        id
    }

    /// Discards the innermost scope. Returns `None` once only the root is left.
    pub fn pop(&mut self) -> Option<Scope<K, V>> {
        self.nested.pop()
    }

    pub fn lookup<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.nested
            .iter()
            .rev()
            .chain(std::iter::once(&self.root))
            .find_map(|scope| scope.get(key))
    }

    /// Binds `k` in the innermost scope. Shadowing an outer binding is fine,
    /// rebinding within the same scope is not.
    pub fn declare(&mut self, k: K, v: V) -> Result<&V, ScopeError> {
        self.declare_at(self.depth() - 1, k, v)
    }

    /// Binds `k` in the scope at `depth`, counted from the root (depth 0).
    pub fn declare_at(&mut self, depth: usize, k: K, v: V) -> Result<&V, ScopeError> {
        let scope = match depth {
            0 => &mut self.root,
            _ => match self.nested.get_mut(depth - 1) {
                Some(scope) => scope,
                None => return Err(ScopeError::StackNotDeepEnough),
            },
        };

        if scope.contains(&k) {
            return Err(ScopeError::AlreadyDeclared);
        }

        Ok(scope.entries.entry(k).or_insert(v))
    }

    /// Unbinds `key` from the scope at `depth`, returning the removed value.
    pub fn remove_at<Q>(&mut self, depth: usize, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let scope = match depth {
            0 => &mut self.root,
            _ => self.nested.get_mut(depth - 1)?,
        };

        scope.entries.remove(key)
    }

    pub fn current_id(&self) -> ScopeId {
        self.nested.last().unwrap_or(&self.root).id
    }

    /// Number of scopes on the stack, root included.
    pub fn depth(&self) -> usize {
        self.nested.len() + 1
    }

    pub fn into_root(self) -> Scope<K, V> {
        self.root
    }
}
