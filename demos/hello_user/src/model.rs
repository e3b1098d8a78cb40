//! Domain types rendered through the generated `StringUtil`.

use std::fmt;

use static_string_util::{CreateString, static_string_util};

include!(concat!(env!("OUT_DIR"), "/model/string_util.rs"));

/// A registered user.
#[static_string_util]
pub struct User {
    name: String,
    email: String,
}

impl User {
    /// Creates a user.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&StringUtil::create_string(self))
    }
}

/// A liveness probe; carries no data.
#[static_string_util]
#[derive(Debug, Default, Clone, Copy)]
pub struct Ping;

impl fmt::Display for Ping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&StringUtil::create_string(self))
    }
}

/// A sensor reading: tenths of a degree and the unit symbol.
#[static_string_util]
pub struct Reading(pub i32, pub String);
