use std::collections::HashMap;

/// Natural key to surrogate id map for one dimension table.
///
/// Built once per dimension from the finished rows and passed by reference
/// to every extractor that needs it. Inserting a duplicate key keeps the
/// later id, so a natural key that appears on several rows resolves to the
/// highest matching row.
#[derive(Debug, Default)]
pub struct SurrogateIndex {
    ids: HashMap<String, i64>,
}

impl SurrogateIndex {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
        }
    }

    /// Build an index from `(key, id)` pairs in row order.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: Into<String>,
    {
        let mut index = Self::new();
        for (key, id) in pairs {
            index.insert(key, id);
        }
        index
    }

    pub fn insert(&mut self, key: impl Into<String>, id: i64) {
        self.ids.insert(key.into(), id);
    }

    /// Look a natural key up. An unknown key is a miss, not an error; the
    /// caller decides what a missing foreign key means.
    pub fn resolve(&self, key: &str) -> Option<i64> {
        self.ids.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
