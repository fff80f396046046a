//! Explanation tiers: the trees of assertions or metadata hanging off a result.
//!
//! A tier node records the values introduced at its own level, the tiers of the
//! operands that causally explain the outcome, and the tiers of every evaluated
//! operand. Nodes are shared through [`Arc`]; every traversal deduplicates by node
//! identity so a sub-tree referenced from several parents is visited once.

use std::collections::HashSet;
use std::sync::Arc;

/// Tier of human readable assertions.
pub type Explanation = Tier<String>;

/// Tier of strongly typed metadata mirroring an [`Explanation`].
pub type MetadataNode<T> = Tier<T>;

/// One node of an explanation or metadata tree.
#[derive(Debug)]
pub struct Tier<V> {
    values: Vec<V>,
    causal: Vec<Arc<Tier<V>>>,
    operands: Vec<Arc<Tier<V>>>,
}

impl<V> Tier<V> {
    /// Creates a node from its own values, its causal children and all operand children.
    pub fn new(values: Vec<V>, causal: Vec<Arc<Tier<V>>>, operands: Vec<Arc<Tier<V>>>) -> Self {
        Self {
            values,
            causal,
            operands,
        }
    }

    /// Creates a childless node.
    pub fn leaf(values: Vec<V>) -> Self {
        Self::new(values, Vec::new(), Vec::new())
    }

    /// Values introduced at this node; empty when the node only forwards.
    pub fn own_values(&self) -> &[V] {
        &self.values
    }

    /// Tiers of the causal operands.
    pub fn underlying(&self) -> &[Arc<Tier<V>>] {
        &self.causal
    }

    /// Tiers of every evaluated operand, causal or not.
    pub fn all_underlying(&self) -> &[Arc<Tier<V>>] {
        &self.operands
    }

    /// Returns whether the node introduces no values of its own.
    pub fn is_forwarding(&self) -> bool {
        self.values.is_empty()
    }

    /// Values of the first declaring nodes reached along causal paths.
    pub fn values(&self) -> Vec<&V> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        collect_declared(self, &mut seen, &mut out, causal_of);
        out
    }

    /// Every value declared anywhere below this node, ignoring causality.
    pub fn all_values(&self) -> Vec<&V> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        collect_everything(self, &mut seen, &mut out);
        out
    }

    /// Declared values one level down, along causal operands.
    pub fn sub_values(&self) -> Vec<&V> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        for child in unique(&self.causal) {
            collect_declared(child, &mut seen, &mut out, causal_of);
        }
        out
    }

    /// Declared values one level down, along every operand.
    pub fn all_sub_values(&self) -> Vec<&V> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        for child in unique(&self.operands) {
            collect_declared(child, &mut seen, &mut out, operands_of);
        }
        out
    }

    /// Values of the leaf nodes reached along causal paths.
    pub fn root_values(&self) -> Vec<&V> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        collect_roots(self, &mut seen, &mut out, causal_of);
        out
    }

    /// Values of the leaf nodes reached along every path.
    pub fn all_root_values(&self) -> Vec<&V> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        collect_roots(self, &mut seen, &mut out, operands_of);
        out
    }
}

impl Tier<String> {
    /// Assertions of the first declaring nodes along causal paths, without repeats.
    pub fn assertions(&self) -> Vec<String> {
        distinct(self.values())
    }

    /// Every assertion in the subtree, ignoring causality, without repeats.
    pub fn all_assertions(&self) -> Vec<String> {
        distinct(self.all_values())
    }

    /// Assertions one level down along causal operands.
    pub fn sub_assertions(&self) -> Vec<String> {
        distinct(self.sub_values())
    }

    /// Assertions one level down along every operand.
    pub fn all_sub_assertions(&self) -> Vec<String> {
        distinct(self.all_sub_values())
    }

    /// Leaf-level assertions along causal paths.
    pub fn root_assertions(&self) -> Vec<String> {
        distinct(self.root_values())
    }

    /// Leaf-level assertions along every path.
    pub fn all_root_assertions(&self) -> Vec<String> {
        distinct(self.all_root_values())
    }
}

fn causal_of<V>(tier: &Tier<V>) -> &Vec<Arc<Tier<V>>> {
    &tier.causal
}

fn operands_of<V>(tier: &Tier<V>) -> &Vec<Arc<Tier<V>>> {
    &tier.operands
}

fn key<V>(tier: &Tier<V>) -> *const Tier<V> {
    tier as *const Tier<V>
}

fn unique<V>(children: &[Arc<Tier<V>>]) -> impl Iterator<Item = &Tier<V>> {
    let mut seen = HashSet::new();
    children
        .iter()
        .map(Arc::as_ref)
        .filter(move |child| seen.insert(key(*child)))
}

fn collect_declared<'a, V>(
    tier: &'a Tier<V>,
    seen: &mut HashSet<*const Tier<V>>,
    out: &mut Vec<&'a V>,
    next: fn(&Tier<V>) -> &Vec<Arc<Tier<V>>>,
) {
    if !seen.insert(key(tier)) {
        return;
    }
    if !tier.values.is_empty() {
        out.extend(tier.values.iter());
        return;
    }
    for child in next(tier) {
        collect_declared(child, seen, out, next);
    }
}

fn collect_everything<'a, V>(
    tier: &'a Tier<V>,
    seen: &mut HashSet<*const Tier<V>>,
    out: &mut Vec<&'a V>,
) {
    if !seen.insert(key(tier)) {
        return;
    }
    out.extend(tier.values.iter());
    for child in &tier.operands {
        collect_everything(child, seen, out);
    }
}

fn collect_roots<'a, V>(
    tier: &'a Tier<V>,
    seen: &mut HashSet<*const Tier<V>>,
    out: &mut Vec<&'a V>,
    next: fn(&Tier<V>) -> &Vec<Arc<Tier<V>>>,
) {
    if !seen.insert(key(tier)) {
        return;
    }
    let children = next(tier);
    if children.is_empty() {
        out.extend(tier.values.iter());
        return;
    }
    for child in children {
        collect_roots(child, seen, out, next);
    }
}

fn distinct(values: Vec<&String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(*value))
        .cloned()
        .collect()
}
