use std::fmt;

use zeroize::Zeroize;

/// Memory-safe container for sensitive bytes that zeros itself on drop.
///
/// The buffer always owns its storage outright: it is created from a copy of
/// the caller's data and never hands out anything but slices into its own
/// allocation. Dropping it overwrites every stored byte with `0x00` before
/// the memory is returned to the allocator.
pub struct SecureBytes {
    data: Vec<u8>,
}

impl SecureBytes {
    pub fn new(mut data: Vec<u8>) -> Self {
        // Ensure capacity equals length to prevent leftover data in unused capacity
        data.shrink_to_fit();
        Self { data }
    }

    /// Copy `slice` into a freshly owned buffer.
    pub fn copy_from(slice: &[u8]) -> Self {
        Self::new(slice.to_vec())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Mutable view for callers that want to wipe or rework their own copy.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl AsRef<[u8]> for SecureBytes {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// Redacted: never prints the stored bytes.
impl fmt::Debug for SecureBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureBytes({} bytes redacted)", self.data.len())
    }
}

impl Drop for SecureBytes {
    fn drop(&mut self) {
        // Explicitly zero memory before deallocation
        self.data.as_mut_slice().zeroize();
        #[cfg(test)]
        wipe_log::record(self.data.len(), self.data.iter().all(|b| *b == 0));
    }
}
