//! Dependency resolver
//!
//! Orders buckets so that every bucket comes after the bucket it depends on.
//! Each bucket has at most one outgoing edge, so the depth-first walk is a
//! walk along a chain.

use crate::types::Bucket;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// A dependency edge removed to break a cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeveredEdge {
    /// Bucket that lost its dependency
    pub bucket: String,
    /// Bucket it used to depend on
    pub depends_on: String,
}

/// Result of ordering the buckets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Bucket names, dependencies first
    pub order: Vec<String>,
    /// Edges cleared to make the graph acyclic
    pub severed: Vec<SeveredEdge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Compute the processing order and write it into `buckets`
///
/// Dependencies on buckets that no longer exist count as no dependency and
/// are left untouched on the bucket. When a cycle is found, the edge of the
/// bucket that led back into the in-progress chain is cleared and the sort
/// starts over. Every restart removes one edge, so this terminates.
pub fn resolve_order(buckets: &mut [Bucket]) -> Resolution {
    let names: Vec<String> = buckets.iter().map(|b| b.name.clone()).collect();
    let mut deps = dependency_map(buckets);
    let mut severed = Vec::new();

    let order = loop {
        match topo_sort(&names, &deps) {
            Ok(order) => break order,
            Err(culprit) => match deps.remove(&culprit) {
                Some(depends_on) => {
                    warn!("Dependency cycle: dropping edge {culprit} -> {depends_on}");
                    severed.push(SeveredEdge {
                        bucket: culprit,
                        depends_on,
                    });
                }
                None => break names.clone(),
            },
        }
    };

    for edge in &severed {
        if let Some(bucket) = buckets.iter_mut().find(|b| b.name == edge.bucket) {
            bucket.depends_on = None;
        }
    }

    let position: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();
    for bucket in buckets.iter_mut() {
        bucket.order = position.get(bucket.name.as_str()).copied();
    }

    debug!("Resolved bucket order: {}", order.join(" -> "));

    Resolution { order, severed }
}

/// Whether adding `name -> depends_on` would close a cycle
pub fn would_create_cycle(buckets: &[Bucket], name: &str, depends_on: &str) -> bool {
    if name == depends_on {
        return true;
    }

    let deps = dependency_map(buckets);
    let mut seen = HashSet::new();
    let mut current = Some(depends_on.to_string());

    while let Some(node) = current {
        if node == name {
            return true;
        }
        if !seen.insert(node.clone()) {
            return false;
        }
        current = deps.get(&node).cloned();
    }

    false
}

/// Chain of buckets from the root dependency down to `name`
///
/// Stops early if the chain loops back on itself.
pub fn dependency_chain(buckets: &[Bucket], name: &str) -> Vec<String> {
    let deps = dependency_map(buckets);
    let mut path = vec![name.to_string()];
    let mut seen: HashSet<String> = path.iter().cloned().collect();
    let mut current = name.to_string();

    while let Some(parent) = deps.get(&current) {
        if !seen.insert(parent.clone()) {
            break;
        }
        path.push(parent.clone());
        current = parent.clone();
    }

    path.reverse();
    path
}

/// Edges whose target exists
fn dependency_map(buckets: &[Bucket]) -> HashMap<String, String> {
    let known: HashSet<&str> = buckets.iter().map(|b| b.name.as_str()).collect();

    buckets
        .iter()
        .filter_map(|b| {
            let dep = b.depends_on.as_ref()?;
            known
                .contains(dep.as_str())
                .then(|| (b.name.clone(), dep.clone()))
        })
        .collect()
}

/// Three-colour DFS; `Err` names the bucket whose edge closes a cycle
fn topo_sort(
    names: &[String],
    deps: &HashMap<String, String>,
) -> std::result::Result<Vec<String>, String> {
    let mut marks: HashMap<&str, Mark> = names
        .iter()
        .map(|n| (n.as_str(), Mark::Unvisited))
        .collect();
    let mut order = Vec::with_capacity(names.len());

    for start in names {
        if marks.get(start.as_str()) != Some(&Mark::Unvisited) {
            continue;
        }

        let mut path: Vec<&str> = Vec::new();
        let mut current = Some(start.as_str());

        while let Some(name) = current {
            match marks.get(name).copied().unwrap_or(Mark::Done) {
                Mark::Done => break,
                Mark::InProgress => {
                    let culprit = path.last().copied().unwrap_or(name);
                    return Err(culprit.to_string());
                }
                Mark::Unvisited => {
                    marks.insert(name, Mark::InProgress);
                    path.push(name);
                    current = deps.get(name).map(String::as_str);
                }
            }
        }

        // Path runs dependent -> dependency; emit dependencies first
        for name in path.into_iter().rev() {
            marks.insert(name, Mark::Done);
            order.push(name.to_string());
        }
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(name: &str, depends_on: Option<&str>) -> Bucket {
        let mut b = Bucket::new(name, name, None);
        b.depends_on = depends_on.map(ToString::to_string);
        b
    }

    fn position(order: &[String], name: &str) -> usize {
        order.iter().position(|n| n == name).unwrap()
    }

    #[test]
    fn test_no_dependencies_keeps_insertion_order() {
        let mut buckets = vec![bucket("a", None), bucket("b", None), bucket("c", None)];
        let resolution = resolve_order(&mut buckets);

        assert_eq!(resolution.order, vec!["a", "b", "c"]);
        assert!(resolution.severed.is_empty());
        assert_eq!(buckets[2].order, Some(2));
    }

    #[test]
    fn test_dependency_comes_first() {
        let mut buckets = vec![bucket("b", Some("a")), bucket("a", None)];
        let resolution = resolve_order(&mut buckets);

        assert_eq!(resolution.order, vec!["a", "b"]);
        assert_eq!(buckets[0].order, Some(1));
        assert_eq!(buckets[1].order, Some(0));
    }

    #[test]
    fn test_chain() {
        let mut buckets = vec![
            bucket("c", Some("b")),
            bucket("b", Some("a")),
            bucket("a", None),
        ];
        let resolution = resolve_order(&mut buckets);

        assert_eq!(resolution.order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_dependency_is_ignored() {
        let mut buckets = vec![bucket("a", Some("gone"))];
        let resolution = resolve_order(&mut buckets);

        assert_eq!(resolution.order, vec!["a"]);
        assert!(resolution.severed.is_empty());
        // Dangling edge is left for the caller to see
        assert_eq!(buckets[0].depends_on.as_deref(), Some("gone"));
    }

    #[test]
    fn test_two_cycle_is_broken() {
        let mut buckets = vec![bucket("a", Some("b")), bucket("b", Some("a"))];
        let resolution = resolve_order(&mut buckets);

        assert_eq!(resolution.severed.len(), 1);
        // a -> b -> (a in progress): b's edge closed the cycle
        assert_eq!(resolution.severed[0].bucket, "b");
        assert_eq!(buckets[1].depends_on, None);
        assert_eq!(buckets[0].depends_on.as_deref(), Some("b"));
        assert_eq!(resolution.order, vec!["b", "a"]);
    }

    #[test]
    fn test_self_loop_is_broken() {
        let mut buckets = vec![bucket("a", Some("a"))];
        let resolution = resolve_order(&mut buckets);

        assert_eq!(resolution.order, vec!["a"]);
        assert_eq!(resolution.severed[0].bucket, "a");
        assert_eq!(buckets[0].depends_on, None);
    }

    #[test]
    fn test_cycle_through_all_buckets_terminates() {
        let names: Vec<String> = (0..50).map(|i| format!("b{i}")).collect();
        let mut buckets: Vec<Bucket> = names
            .iter()
            .enumerate()
            .map(|(i, n)| bucket(n, Some(&names[(i + 1) % names.len()])))
            .collect();

        let resolution = resolve_order(&mut buckets);

        assert_eq!(resolution.order.len(), 50);
        assert_eq!(resolution.severed.len(), 1);
        for b in &buckets {
            if let Some(dep) = &b.depends_on {
                assert!(position(&resolution.order, dep) < position(&resolution.order, &b.name));
            }
        }
    }

    #[test]
    fn test_would_create_cycle() {
        let buckets = vec![bucket("a", None), bucket("b", Some("a")), bucket("c", Some("b"))];

        assert!(would_create_cycle(&buckets, "a", "c"));
        assert!(would_create_cycle(&buckets, "a", "a"));
        assert!(!would_create_cycle(&buckets, "c", "a"));
    }

    #[test]
    fn test_dependency_chain() {
        let buckets = vec![bucket("a", None), bucket("b", Some("a")), bucket("c", Some("b"))];

        assert_eq!(dependency_chain(&buckets, "c"), vec!["a", "b", "c"]);
        assert_eq!(dependency_chain(&buckets, "a"), vec!["a"]);
    }

    #[test]
    fn test_dependency_chain_stops_on_loop() {
        let buckets = vec![bucket("a", Some("b")), bucket("b", Some("a"))];

        assert_eq!(dependency_chain(&buckets, "a"), vec!["b", "a"]);
    }
}
