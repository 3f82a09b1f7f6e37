use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a stored meetup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeetupId(String);

impl MeetupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeetupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted meetup event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meetup {
    pub id: MeetupId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<String>,
}

impl Meetup {
    /// Build a meetup from creation input, copying every field verbatim.
    pub fn from_new(id: MeetupId, input: NewMeetup) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            location: input.location,
            starts_at: input.starts_at,
        }
    }
}

/// Caller-supplied input for `createMeetup`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeetup {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub location: String,
    #[serde(default)]
    pub starts_at: Option<String>,
}

impl NewMeetup {
    pub fn new(title: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            location: location.into(),
            ..Self::default()
        }
    }
}
