use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A role as described by its JSON record.
///
/// Only `name` is required; everything else defaults to empty / `false` so that
/// partially filled records still produce a token.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Role {
    /// The name of the role, curved along the bottom of the token
    pub name: String,
    /// The ability text, fitted to the middle of the token
    pub ability: String,
    /// Townsfolk, Outsider, Minion, Demon, Traveller, ...
    #[serde(rename = "type")]
    pub role_type: String,
    /// Path of the icon image
    pub icon: PathBuf,
    /// Wakes on the first night
    pub first_night: bool,
    /// Wakes on nights other than the first
    pub other_nights: bool,
    /// Changes the game setup
    pub affects_setup: bool,
    /// One reminder token is produced per entry
    pub reminders: Vec<String>,
    /// The script the role first appeared in
    pub home_script: String,
}

impl Role {
    pub fn new<S: ToString>(name: S) -> Role {
        Role {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_a_full_record() {
        let json = r#"{
            "name": "Fortune Teller",
            "ability": "Each night, choose 2 players: you learn if either is a Demon.",
            "type": "Townsfolk",
            "icon": "Fortune_Teller.png",
            "first_night": true,
            "other_nights": true,
            "reminders": ["Red Herring"],
            "affects_setup": false,
            "home_script": "Trouble Brewing"
        }"#;
        let role: Role = serde_json::from_str(json).expect("valid role");
        assert_eq!(role.name, "Fortune Teller");
        assert_eq!(role.role_type, "Townsfolk");
        assert_eq!(role.icon, PathBuf::from("Fortune_Teller.png"));
        assert!(role.first_night && role.other_nights && !role.affects_setup);
        assert_eq!(role.reminders, vec!["Red Herring".to_string()]);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let role: Role = serde_json::from_str(r#"{"name": "Drunk"}"#).expect("valid role");
        assert_eq!(role, Role::new("Drunk"));
        assert!(role.reminders.is_empty());
    }

    #[test]
    fn displays_name_and_ability() {
        let mut role = Role::new("Imp");
        role.ability = "Each night*, choose a player: they die.".into();
        assert_eq!(role.to_string(), "Imp: Each night*, choose a player: they die.");
    }
}
