use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

/// Child-to-parent index over the genre hierarchy, used for ancestor-path
/// queries on hover. Derived once per dataset load; the parent of a child is
/// the first parent encountered while scanning the adjacency list in document
/// order.
#[derive(Clone, Debug, Default)]
pub struct AncestorIndex {
	parents: HashMap<String, String>,
	root: Option<String>,
}

impl AncestorIndex {
	pub fn derive(adjacency: &IndexMap<String, Vec<String>>, root: Option<String>) -> Self {
		let mut parents = HashMap::new();
		for (parent, children) in adjacency {
			for child in children {
				parents
					.entry(child.clone())
					.or_insert_with(|| parent.clone());
			}
		}
		Self { parents, root }
	}

	pub fn root(&self) -> Option<&str> {
		self.root.as_deref()
	}

	/// All nodes on the path from `id` up to the root, inclusive of both ends.
	/// The walk is bounded by `limit` so cyclic or malformed parent data
	/// cannot loop forever; a missing parent ends the walk early.
	pub fn ancestors_of(&self, id: &str, limit: usize) -> HashSet<String> {
		let mut ancestors = HashSet::new();
		ancestors.insert(id.to_string());
		let mut current = id.to_string();
		let mut steps = 0;
		while steps < limit {
			if Some(current.as_str()) == self.root() {
				break;
			}
			let Some(parent) = self.parents.get(&current) else {
				break;
			};
			current = parent.clone();
			ancestors.insert(current.clone());
			steps += 1;
		}
		ancestors
	}

	/// Ordered display path root → … → `id`. Unlike [`ancestors_of`] this
	/// preserves order; the root is prepended only when the walk reaches it.
	///
	/// [`ancestors_of`]: AncestorIndex::ancestors_of
	pub fn path_to(&self, id: &str, limit: usize) -> Vec<String> {
		let mut path = Vec::new();
		let mut current = id.to_string();
		let mut steps = 0;
		while Some(current.as_str()) != self.root() && steps < limit {
			path.push(current.clone());
			let Some(parent) = self.parents.get(&current) else {
				break;
			};
			current = parent.clone();
			steps += 1;
		}
		path.reverse();
		if Some(current.as_str()) == self.root() || Some(id) == self.root() {
			if let Some(root) = &self.root {
				path.insert(0, root.clone());
			}
		}
		if path.is_empty() {
			path.push(id.to_string());
		}
		path
	}

	/// Tooltip form of [`path_to`], e.g. `"pop → rock → indie"`.
	///
	/// [`path_to`]: AncestorIndex::path_to
	pub fn path_string(&self, id: &str, limit: usize) -> String {
		self.path_to(id, limit).join(" → ")
	}
}
