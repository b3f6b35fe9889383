use crate::errors::SecretError;
use crate::memory::SecureBytes;

/// In-memory custody buffer for a prompted secret.
///
/// Holds the prompt shown to whoever supplies the secret, the echo policy
/// for the input surface, and a private copy of the secret itself. The
/// contract is to minimize, not eliminate, the window in which sensitive
/// bytes are readable: writes and reads always work on defensive copies, and
/// the stored copy is wiped on [`clear_secret`](Self::clear_secret), on
/// overwrite, and as a backstop when the buffer is dropped. Callers that
/// care about deterministic timing call `clear_secret` themselves rather
/// than relying on drop order.
///
/// Not synchronized: sharing one buffer across threads requires an external
/// mutex.
///
/// ```
/// use passbuf::SecretBuffer;
///
/// let mut buf = SecretBuffer::new("Enter password:", false)?;
/// buf.set_secret(Some(b"hunter2"));
/// let copy = buf.secret().unwrap();
/// assert_eq!(copy.as_slice(), b"hunter2");
/// buf.clear_secret();
/// assert!(buf.secret().is_none());
/// # Ok::<(), passbuf::SecretError>(())
/// ```
pub struct SecretBuffer {
    prompt: String,
    echo_on: bool,
    secret: Option<SecureBytes>,
}

impl SecretBuffer {
    /// Create a buffer with no secret set.
    ///
    /// `prompt` is the text presented when requesting the secret and must
    /// not be empty; `echo_on` says whether the secret may be displayed
    /// while being typed. Both are fixed for the buffer's lifetime.
    pub fn new(prompt: impl Into<String>, echo_on: bool) -> Result<Self, SecretError> {
        let prompt = prompt.into();
        if prompt.is_empty() {
            return Err(SecretError::InvalidConfiguration(
                "prompt must not be empty".to_string(),
            ));
        }
        Ok(Self {
            prompt,
            echo_on,
            secret: None,
        })
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Whether the secret may be echoed to its input surface while typed.
    pub fn is_echo_on(&self) -> bool {
        self.echo_on
    }

    /// Store a defensive copy of `secret`, or clear it with `None`.
    ///
    /// Any previously stored secret is wiped before the new copy is
    /// installed, so the old bytes are never left unzeroed once the
    /// replacement is in place. The caller keeps full responsibility for its
    /// own buffer; only the private copy made here is managed by this type.
    /// `Some(&[])` stores a present, empty secret.
    pub fn set_secret(&mut self, secret: Option<&[u8]>) {
        // Wipe the old copy first; SecureBytes zeroes itself on drop.
        self.secret.take();
        self.secret = secret.map(SecureBytes::copy_from);
        match &self.secret {
            Some(s) => log::trace!("stored {} byte secret for {:?}", s.len(), self.prompt),
            None => log::trace!("cleared secret for {:?}", self.prompt),
        }
    }

    /// Return a fresh copy of the stored secret, or `None` if absent.
    ///
    /// Every call copies. Mutating a returned buffer affects neither the
    /// stored secret nor any other returned copy; each copy's lifetime, and
    /// hence its exposure window, is the caller's to manage (the copies wipe
    /// themselves when dropped).
    pub fn secret(&self) -> Option<SecureBytes> {
        self.secret.as_ref().map(|s| SecureBytes::copy_from(s.as_slice()))
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Wipe the stored secret and mark it absent.
    ///
    /// Overwrites every stored byte with `0x00` synchronously, before this
    /// call returns. Idempotent: clearing an empty buffer, or clearing
    /// twice, is a no-op.
    pub fn clear_secret(&mut self) {
        if self.secret.take().is_some() {
            log::trace!("cleared secret for {:?}", self.prompt);
        }
    }
}

impl Drop for SecretBuffer {
    fn drop(&mut self) {
        // The secret wipes itself when the field drops; just leave a trace
        // for callers hunting down missing clear_secret calls.
        if self.secret.is_some() {
            log::trace!("dropping {:?} with secret still set, wiping", self.prompt);
        }
    }
}

impl std::fmt::Debug for SecretBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretBuffer")
            .field("prompt", &self.prompt)
            .field("echo_on", &self.echo_on)
            .field("secret", &self.secret)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::wipe_log;

    #[test]
    fn new_buffer_has_prompt_and_no_secret() {
        let buf = SecretBuffer::new("Enter password:", false).unwrap();
        assert_eq!(buf.prompt(), "Enter password:");
        assert!(!buf.is_echo_on());
        assert!(!buf.has_secret());
        assert!(buf.secret().is_none());
    }

    #[test]
    fn empty_prompt_is_rejected() {
        let result = SecretBuffer::new("", true);
        assert!(matches!(
            result.unwrap_err(),
            SecretError::InvalidConfiguration(_)
        ));
    }

    #[test]
    fn echo_flag_is_preserved() {
        let buf = SecretBuffer::new("PIN:", true).unwrap();
        assert!(buf.is_echo_on());
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut buf = SecretBuffer::new("Enter password:", false).unwrap();
        buf.set_secret(Some(b"secret"));
        assert_eq!(buf.secret().unwrap().as_slice(), b"secret");
        buf.clear_secret();
        assert!(buf.secret().is_none());
    }

    #[test]
    fn stored_copy_is_independent_of_caller_buffer() {
        let mut buf = SecretBuffer::new("pw:", false).unwrap();
        let mut input = vec![b's', b'e', b'c'];
        buf.set_secret(Some(&input));
        input[0] = b'X';
        assert_eq!(buf.secret().unwrap().as_slice(), b"sec");
    }

    #[test]
    fn returned_copies_are_independent() {
        let mut buf = SecretBuffer::new("pw:", false).unwrap();
        buf.set_secret(Some(b"abc"));
        let mut first = buf.secret().unwrap();
        first.as_mut_slice()[0] = b'Z';
        assert_eq!(buf.secret().unwrap().as_slice(), b"abc");
    }

    #[test]
    fn overwrite_wipes_the_previous_secret() {
        let mut buf = SecretBuffer::new("pw:", false).unwrap();
        buf.set_secret(Some(b"first"));
        wipe_log::take();
        buf.set_secret(Some(b"second"));
        // The five bytes of "first" were zeroed before "second" took over.
        assert_eq!(wipe_log::take(), vec![(5, true)]);
        assert_eq!(buf.secret().unwrap().as_slice(), b"second");
    }

    #[test]
    fn set_secret_none_clears() {
        let mut buf = SecretBuffer::new("pw:", false).unwrap();
        buf.set_secret(Some(b"gone"));
        buf.set_secret(None);
        assert!(!buf.has_secret());
    }

    #[test]
    fn empty_secret_is_present() {
        let mut buf = SecretBuffer::new("pw:", false).unwrap();
        buf.set_secret(Some(&[]));
        assert!(buf.has_secret());
        assert!(buf.secret().unwrap().is_empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut buf = SecretBuffer::new("pw:", false).unwrap();
        buf.clear_secret();
        buf.set_secret(Some(b"once"));
        buf.clear_secret();
        buf.clear_secret();
        buf.clear_secret();
        assert!(buf.secret().is_none());
    }

    #[test]
    fn clear_wipes_synchronously() {
        let mut buf = SecretBuffer::new("pw:", false).unwrap();
        buf.set_secret(Some(b"wipe me"));
        wipe_log::take();
        buf.clear_secret();
        assert_eq!(wipe_log::take(), vec![(7, true)]);
    }

    #[test]
    fn drop_without_clear_still_wipes() {
        wipe_log::take();
        {
            let mut buf = SecretBuffer::new("pw:", false).unwrap();
            buf.set_secret(Some(b"forgotten"));
        }
        assert_eq!(wipe_log::take(), vec![(9, true)]);
    }

    #[test]
    fn debug_never_shows_the_secret() {
        let mut buf = SecretBuffer::new("pw:", false).unwrap();
        buf.set_secret(Some(b"hunter2"));
        let rendered = format!("{:?}", buf);
        assert!(rendered.contains("pw:"));
        assert!(!rendered.contains("hunter2"));
    }
}
