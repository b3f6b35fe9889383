use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::buffer::SecretBuffer;
use crate::errors::SecretError;

/// Serializable snapshot of a [`SecretBuffer`].
///
/// Carries the raw secret bytes, so hosts that persist it are expected to
/// protect the bytes at rest themselves. The snapshot zeroes itself on drop
/// so its copy of the secret does not linger once it has been consumed.
#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct PersistedSecret {
    pub prompt: String,
    #[zeroize(skip)]
    pub echo_on: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<Vec<u8>>,
}

impl SecretBuffer {
    /// Snapshot this buffer for persistence, copying the secret out.
    pub fn to_persisted(&self) -> PersistedSecret {
        PersistedSecret {
            prompt: self.prompt().to_string(),
            echo_on: self.is_echo_on(),
            secret: self.secret().map(|s| s.as_slice().to_vec()),
        }
    }

    /// Rebuild a buffer from a persisted snapshot.
    ///
    /// Re-runs the construction invariant (non-empty prompt), surfacing a
    /// violation as [`SecretError::InvalidPersistedState`], and re-copies the
    /// secret through the same path as a live write so the restored buffer
    /// wipes it like any other. The snapshot's own copy is wiped when it
    /// drops at the end of this call.
    pub fn from_persisted(state: PersistedSecret) -> Result<Self, SecretError> {
        let mut buffer = Self::new(state.prompt.clone(), state.echo_on)
            .map_err(|_| SecretError::InvalidPersistedState("missing prompt".to_string()))?;
        buffer.set_secret(state.secret.as_deref());
        Ok(buffer)
    }
}

impl Serialize for SecretBuffer {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.to_persisted().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretBuffer {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let state = PersistedSecret::deserialize(deserializer)?;
        SecretBuffer::from_persisted(state).map_err(serde::de::Error::custom)
    }
}
