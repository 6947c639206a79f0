use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A ride requester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rider {
    pub id: Uuid,
    pub name: String,
    /// Live connection channel while connected.
    pub channel: Option<Uuid>,
}

impl Rider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            channel: None,
        }
    }
}
