use std::{fmt, ops::Deref};

use thiserror::Error;

/// Returns true if `s` is empty or contains only whitespace.
pub fn is_empty_or_whitespace(s: &str) -> bool {
    s.trim().is_empty()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Room name cannot be empty or whitespace")]
pub struct InvalidRoomName;

/// A room name that has passed validation. The store only writes these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomName(String);

impl RoomName {
    pub fn parse(name: String) -> Result<Self, InvalidRoomName> {
        if is_empty_or_whitespace(&name) {
            return Err(InvalidRoomName);
        }
        Ok(Self(name))
    }
}

impl TryFrom<String> for RoomName {
    type Error = InvalidRoomName;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::parse(name)
    }
}

impl TryFrom<&str> for RoomName {
    type Error = InvalidRoomName;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::parse(name.to_owned())
    }
}

impl Deref for RoomName {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
