use crate::core::ports::KeyBinding;
use crate::selection::action::{Action, CopyField, Direction};
use serde::{Deserialize, Serialize};

/// Keys passed to rofi for each custom action. Overridable from the `[keys]` config table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub copy_password: String,
    pub copy_username: String,
    pub delete_credential: String,
    pub copy_otp: String,
    pub copy_url: String,
    pub copy_domain: String,
    pub copy_user_domain: String,
    pub move_up: String,
    pub move_down: String,
    pub open_url: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            copy_password: "Ctrl+c".into(),
            copy_username: "Ctrl+C".into(),
            delete_credential: "Ctrl+X".into(),
            copy_otp: "Ctrl+o".into(),
            copy_url: "Ctrl+l".into(),
            copy_domain: "Ctrl+D".into(),
            copy_user_domain: "Ctrl+F".into(),
            move_up: "Ctrl+K".into(),
            move_down: "Ctrl+J".into(),
            open_url: "Ctrl+B".into(),
        }
    }
}

impl KeyBindings {
    pub fn keys_for(&self, action: Action) -> &str {
        match action {
            Action::Copy(CopyField::Password) => &self.copy_password,
            Action::Copy(CopyField::Username) => &self.copy_username,
            Action::Copy(CopyField::Otp) => &self.copy_otp,
            Action::Copy(CopyField::Url) => &self.copy_url,
            Action::Copy(CopyField::Domain) => &self.copy_domain,
            Action::Copy(CopyField::UserDomain) => &self.copy_user_domain,
            Action::Delete => &self.delete_credential,
            Action::Reorder(Direction::Up) => &self.move_up,
            Action::Reorder(Direction::Down) => &self.move_down,
            Action::OpenUrl => &self.open_url,
        }
    }

    /// `-kb-custom-N` bindings in the order the status codes expect.
    pub fn keymap(&self) -> Vec<KeyBinding> {
        Action::BOUND
            .iter()
            .enumerate()
            .map(|(i, action)| KeyBinding {
                flag: format!("-kb-custom-{}", i + 1),
                keys: self.keys_for(*action).to_string(),
            })
            .collect()
    }

    pub fn help_text(&self) -> String {
        let mut out = String::from("key bindings:\n");
        let order = [
            Action::Copy(CopyField::Username),
            Action::Copy(CopyField::Password),
            Action::Copy(CopyField::Otp),
            Action::Copy(CopyField::Url),
            Action::Copy(CopyField::Domain),
            Action::Copy(CopyField::UserDomain),
            Action::OpenUrl,
            Action::Delete,
            Action::Reorder(Direction::Up),
            Action::Reorder(Direction::Down),
        ];
        for action in order {
            out.push_str(&format!(
                "  {:<12}{}\n",
                self.keys_for(action),
                action.describe()
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keymap_numbers_custom_slots_from_one() {
        let map = KeyBindings::default().keymap();
        assert_eq!(map.len(), 10);
        assert_eq!(map[0].flag, "-kb-custom-1");
        assert_eq!(map[0].keys, "Ctrl+c");
        assert_eq!(map[2].keys, "Ctrl+X");
        assert_eq!(map[9].flag, "-kb-custom-10");
    }

    #[test]
    fn partial_toml_table_keeps_other_defaults() {
        let keys: KeyBindings = toml::from_str("move_up = \"Alt+k\"").unwrap();
        assert_eq!(keys.move_up, "Alt+k");
        assert_eq!(keys.move_down, "Ctrl+J");
    }

    #[test]
    fn help_lists_every_action() {
        let text = KeyBindings::default().help_text();
        assert!(text.starts_with("key bindings:"));
        assert!(text.contains("Ctrl+X      Delete Credential"));
        assert_eq!(text.lines().count(), 11);
    }
}
