use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::error::ConvertError;

/// Dense, order-preserving mapping from source category ids to contiguous
/// class indices `0..N-1`.
///
/// Built once per split from the source's declared category listing and
/// immutable afterwards. COCO keys on the numeric `category_id`, VOC on the
/// class name.
#[derive(Debug, Clone)]
pub struct CategoryIndexer<K> {
    index: HashMap<K, usize>,
    names: HashMap<K, String>,
}

impl<K: Eq + Hash + Clone + Display> CategoryIndexer<K> {
    /// Build the indexer from an ordered `(source id, name)` listing.
    ///
    /// Dense indices equal the position in the listing. A repeated source id
    /// is fatal: it would corrupt every later lookup for that id.
    pub fn build(categories: &[(K, String)]) -> Result<Self, ConvertError> {
        let mut index = HashMap::with_capacity(categories.len());
        let mut names = HashMap::with_capacity(categories.len());

        for (dense, (id, name)) in categories.iter().enumerate() {
            if index.insert(id.clone(), dense).is_some() {
                return Err(ConvertError::DuplicateCategory(id.to_string()));
            }
            names.insert(id.clone(), name.clone());
        }

        Ok(Self { index, names })
    }

    /// Dense class index for a source category id.
    pub fn index_of(&self, id: &K) -> Result<usize, ConvertError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| ConvertError::UnknownCategory(id.to_string()))
    }

    /// Human-readable name for a source category id.
    pub fn name_of(&self, id: &K) -> Result<&str, ConvertError> {
        self.names
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| ConvertError::UnknownCategory(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
