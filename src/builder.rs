use log::{debug, warn};

use crate::error::BuildError;
use crate::icons::IconResolver;
use crate::index::EntryIndex;
use crate::merge::EntryTable;
use crate::model::{RawEntryDef, ResolvedEntry};

/// Turns the merged definitions into an [`EntryIndex`].
///
/// Entries without a runnable command are dropped. Any other missing field
/// aborts the whole build. Icons that cannot be resolved are replaced by an
/// empty path.
pub fn build(merged: &EntryTable, icons: &dyn IconResolver) -> Result<EntryIndex, BuildError> {
    if merged.is_empty() {
        warn!("No entries left after merging layers");
    }
    let mut entries = Vec::with_capacity(merged.len());
    for (key, def) in merged.iter() {
        let Some(command) = def.runnable_command() else {
            debug!("Skipping entry '{}' without a command", key);
            continue;
        };
        entries.push(resolve(key, def, command, icons)?);
    }
    EntryIndex::new(entries)
}

fn resolve(
    key: &str,
    def: &RawEntryDef,
    command: &str,
    icons: &dyn IconResolver,
) -> Result<ResolvedEntry, BuildError> {
    let missing = |field| BuildError::MissingField { field, entry: key.to_string() };

    let name = def.name.clone().ok_or_else(|| missing("name"))?;
    let description = def.description.clone().ok_or_else(|| missing("description"))?;
    let icon = def.icon.as_deref().ok_or_else(|| missing("icon"))?;
    let aliases = def.aliases.clone().ok_or_else(|| missing("aliases"))?;
    if aliases.is_empty() {
        return Err(BuildError::EmptyAliases { entry: key.to_string() });
    }

    let icon_path = match icons.resolve(icon) {
        Some(path) => path.to_string_lossy().into_owned(),
        None => {
            warn!("No icon found for: {}", icon);
            String::new()
        }
    };

    Ok(ResolvedEntry::new(
        key.to_string(),
        name,
        description,
        icon_path,
        aliases,
        command.to_string(),
    ))
}
