use serde::{Deserialize, Serialize};

use crate::database::{EntityId, EntityMeta};

/// `{"message": "..."}` body returned by operations with no entity to echo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericMessage {
    pub message: String,
}

impl GenericMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Confirmation for a removed row, e.g. `Article with id 15 deleted`
    pub fn deleted(meta: &EntityMeta, id: &EntityId) -> Self {
        Self::new(format!("{} with id {} deleted", meta.label, id))
    }
}
