use log::{debug, warn};
use std::path::Path;

use crate::desktop::{self, DesktopDescriptor, DesktopTable};
use crate::error::ConfigError;
use crate::sources::read_json;

pub const DESKTOPS_FILE: &str = "desktops.json";

/// Loads the bundled descriptor table with the user's table laid over it.
pub fn load_descriptors(
    data_dir: &Path,
    user_dir: Option<&Path>,
) -> Result<Vec<DesktopDescriptor>, ConfigError> {
    let bundled_path = data_dir.join(DESKTOPS_FILE);
    let mut table = match read_json::<DesktopTable>(&bundled_path)? {
        Some(table) => table,
        None => {
            warn!("No desktop table at {:?}, desktop overlays disabled", bundled_path);
            DesktopTable::new()
        }
    };

    if let Some(user_dir) = user_dir {
        let user_path = user_dir.join(DESKTOPS_FILE);
        if let Some(user) = read_json::<DesktopTable>(&user_path)? {
            debug!("Applying user desktop table from {:?}", user_path);
            table = desktop::overlay(table, user);
        }
    }

    Ok(desktop::descriptors(table))
}
