use log::debug;

use crate::model::RawEntryDef;
use crate::ordered::OrderedMap;
use crate::sources::Layer;

/// The running result of merging layers, in display order.
pub type EntryTable = OrderedMap<RawEntryDef>;

/// Applies one overlay on top of `base`.
///
/// A `null` entry removes the key, an unknown key is appended as-is and a
/// known key is updated field by field. Nested sequences are replaced, not
/// merged.
pub fn merge(mut base: EntryTable, overlay: &Layer) -> EntryTable {
    for (key, def) in overlay.iter() {
        match def {
            None => {
                if base.remove(key).is_some() {
                    debug!("Removed entry '{}'", key);
                }
            }
            Some(def) => match base.get_mut(key) {
                Some(existing) => existing.update(def),
                None => {
                    base.insert(key.to_string(), def.clone());
                }
            },
        }
    }
    base
}

/// Folds layers left to right, later layers winning.
pub fn merge_all<'a, I>(layers: I) -> EntryTable
where
    I: IntoIterator<Item = &'a Layer>,
{
    layers.into_iter().fold(EntryTable::new(), merge)
}
