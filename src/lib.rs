//! Minimal in-memory custody buffer for prompted secrets.
//!
//! A [`SecretBuffer`] carries a password captured from a user or service:
//! the prompt it was requested with, whether it may be echoed while typed,
//! and a private copy of the secret itself. Reads hand out fresh copies,
//! never references into internal storage, and the stored bytes are wiped on
//! [`SecretBuffer::clear_secret`], on overwrite, and on drop. Persisted
//! snapshots re-run the same validation and re-copying on restore.
//!
//! ```
//! use passbuf::SecretBuffer;
//!
//! let mut callback = SecretBuffer::new("Enter password:", false)?;
//! callback.set_secret(Some(b"hunter2"));
//!
//! // Hand the copy to whoever needs it, then clear as early as possible.
//! let password = callback.secret().unwrap();
//! assert_eq!(password.as_slice(), b"hunter2");
//! callback.clear_secret();
//! # Ok::<(), passbuf::SecretError>(())
//! ```

mod buffer;
mod errors;
mod memory;
mod persist;

pub use buffer::SecretBuffer;
pub use errors::SecretError;
pub use memory::SecureBytes;
pub use persist::PersistedSecret;
