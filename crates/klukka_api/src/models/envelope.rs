use serde::{Deserialize, Serialize};

/// `{ "payload": ... }` wrapper carried by every non-auth endpoint.
/// A missing field reads as `None`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Envelope<T> {
    pub payload: Option<T>,
}
