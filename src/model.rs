use serde::{Deserialize, Deserializer, Serialize};

/// A partial entry definition as written in one layer.
///
/// Every field may be absent. `command` additionally distinguishes an
/// explicit `null` (`Some(None)`) from an absent key (`None`) so that an
/// overlay can blank out a command without removing the entry.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntryDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub aliases: Option<Vec<String>>,
    #[serde(default, deserialize_with = "present")]
    pub command: Option<Option<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl RawEntryDef {
    /// Overwrites every field that `overlay` sets. Sequences are replaced
    /// wholesale.
    pub fn update(&mut self, overlay: &RawEntryDef) {
        if let Some(name) = &overlay.name {
            self.name = Some(name.clone());
        }
        if let Some(description) = &overlay.description {
            self.description = Some(description.clone());
        }
        if let Some(icon) = &overlay.icon {
            self.icon = Some(icon.clone());
        }
        if let Some(aliases) = &overlay.aliases {
            self.aliases = Some(aliases.clone());
        }
        if let Some(command) = &overlay.command {
            self.command = Some(command.clone());
        }
    }

    /// The command if it is set to a non-empty string.
    pub fn runnable_command(&self) -> Option<&str> {
        self.command
            .as_ref()
            .and_then(|c| c.as_deref())
            .filter(|c| !c.is_empty())
    }
}

/// A validated menu entry. Only the builder constructs these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    key: String,
    name: String,
    description: String,
    icon_path: String,
    aliases: Vec<String>,
    command: String,
}

impl ResolvedEntry {
    pub(crate) fn new(
        key: String,
        name: String,
        description: String,
        icon_path: String,
        aliases: Vec<String>,
        command: String,
    ) -> Self {
        Self { key, name, description, icon_path, aliases, command }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Empty when the icon could not be resolved.
    pub fn icon_path(&self) -> &str {
        &self.icon_path
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn command(&self) -> &str {
        &self.command
    }
}

/// What the host receives for each listed entry.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultItem {
    pub icon: String,
    pub name: String,
    pub description: String,
    pub on_activate: String,
}

impl From<&ResolvedEntry> for ResultItem {
    fn from(entry: &ResolvedEntry) -> Self {
        Self {
            icon: entry.icon_path().to_string(),
            name: entry.name().to_string(),
            description: entry.description().to_string(),
            on_activate: entry.command().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RawEntryDef, ResolvedEntry, ResultItem};

    #[test]
    fn result_item_carries_entry_fields_in_host_naming() {
        let entry = ResolvedEntry::new(
            "lock".to_string(),
            "Lock".to_string(),
            "Lock the session.".to_string(),
            "/icons/lock.svg".to_string(),
            vec!["lock".to_string()],
            "loginctl lock-session".to_string(),
        );
        let value = serde_json::to_value(ResultItem::from(&entry)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "icon": "/icons/lock.svg",
                "name": "Lock",
                "description": "Lock the session.",
                "onActivate": "loginctl lock-session",
            })
        );
    }

    #[test]
    fn null_command_differs_from_missing_command() {
        let nulled: RawEntryDef = serde_json::from_str(r#"{"command": null}"#).unwrap();
        let missing: RawEntryDef = serde_json::from_str(r#"{"name": "Lock"}"#).unwrap();
        assert_eq!(nulled.command, Some(None));
        assert_eq!(missing.command, None);
    }

    #[test]
    fn update_only_touches_present_fields() {
        let mut base: RawEntryDef = serde_json::from_str(
            r#"{"name": "Lock", "aliases": ["lock", "screen"], "command": "A"}"#,
        )
        .unwrap();
        let overlay: RawEntryDef = serde_json::from_str(r#"{"aliases": ["l"]}"#).unwrap();
        base.update(&overlay);
        assert_eq!(base.name.as_deref(), Some("Lock"));
        assert_eq!(base.aliases, Some(vec!["l".to_string()]));
        assert_eq!(base.runnable_command(), Some("A"));
    }

    #[test]
    fn empty_and_null_commands_are_not_runnable() {
        let empty: RawEntryDef = serde_json::from_str(r#"{"command": ""}"#).unwrap();
        let nulled: RawEntryDef = serde_json::from_str(r#"{"command": null}"#).unwrap();
        assert_eq!(empty.runnable_command(), None);
        assert_eq!(nulled.runnable_command(), None);
        assert_eq!(RawEntryDef::default().runnable_command(), None);
    }
}
