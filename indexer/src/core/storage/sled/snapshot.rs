use std::collections::{BTreeMap, HashMap};

use sled::IVec;

// Pending writes of one tree
pub type Changes = BTreeMap<IVec, IVec>;

/// Pending writes grouped per tree, applied as one batch per tree on commit.
///
/// Records are never deleted from the ledger so a snapshot only holds inserts.
/// Reads must check the snapshot first and fall back on disk.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub trees: HashMap<IVec, Changes>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tree: &IVec, key: &[u8]) -> Option<&IVec> {
        self.trees.get(tree).and_then(|changes| changes.get(key))
    }

    // Returns the value previously written in this snapshot, if any
    pub fn put(&mut self, tree: IVec, key: IVec, value: IVec) -> Option<IVec> {
        self.trees.entry(tree).or_default().insert(key, value)
    }

    // Number of keys added under a tree that are not on disk yet
    pub fn count_new<E, F>(&self, tree: &IVec, on_disk: F) -> Result<usize, E>
    where
        F: Fn(&[u8]) -> Result<bool, E>,
    {
        let Some(changes) = self.trees.get(tree) else {
            return Ok(0);
        };

        let mut count = 0;
        for key in changes.keys() {
            if !on_disk(&key[..])? {
                count += 1;
            }
        }
        Ok(count)
    }

    pub fn is_empty(&self) -> bool {
        self.trees.values().all(|changes| changes.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_and_get() {
        let tree = IVec::from("accounts");
        let mut snapshot = Snapshot::new();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.get(&tree, b"a"), None);

        assert_eq!(snapshot.put(tree.clone(), IVec::from("a"), IVec::from("1")), None);
        assert_eq!(
            snapshot.put(tree.clone(), IVec::from("a"), IVec::from("2")),
            Some(IVec::from("1"))
        );
        assert_eq!(snapshot.get(&tree, b"a"), Some(&IVec::from("2")));
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_count_new_ignores_keys_on_disk() {
        let tree = IVec::from("accounts");
        let mut snapshot = Snapshot::new();
        snapshot.put(tree.clone(), IVec::from("a"), IVec::from("1"));
        snapshot.put(tree.clone(), IVec::from("b"), IVec::from("1"));
        assert_eq!(snapshot.count_new(&tree, |key| Ok::<_, ()>(key == b"a")), Ok(1));
        assert_eq!(snapshot.count_new(&IVec::from("other"), |_| Ok::<_, ()>(false)), Ok(0));
    }

    #[test]
    fn test_count_new_returns_lookup_error() {
        let tree = IVec::from("accounts");
        let mut snapshot = Snapshot::new();
        snapshot.put(tree.clone(), IVec::from("a"), IVec::from("1"));
        assert_eq!(snapshot.count_new(&tree, |_| Err("io")), Err("io"));
    }
}
