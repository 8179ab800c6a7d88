use super::{entry::Entry, settings::Settings};
use serde::{Deserialize, Serialize};

/// A locally registered user. The username is the key of the users map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub password: String,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

impl User {
    pub fn new(password: &str) -> Self {
        Self {
            password: password.to_string(),
            settings: Settings::default(),
            entries: Vec::new(),
        }
    }
}
