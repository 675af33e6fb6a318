//! Hardware auth token.

use std::fmt;

/// Opaque credential-confirmation proof required to authorize an enrollment.
///
/// Obtained by exchanging a gatekeeper password handle for a
/// challenge-scoped token; the byte layout is owned by the platform and not
/// modeled here.
#[derive(Clone, PartialEq, Eq)]
pub struct HardwareAuthToken(Vec<u8>);

impl HardwareAuthToken {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Token bytes stay out of logs.
impl fmt::Debug for HardwareAuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HardwareAuthToken({} bytes)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_bytes() {
        let token = HardwareAuthToken::new(vec![1, 2, 3]);
        assert_eq!(format!("{token:?}"), "HardwareAuthToken(3 bytes)");
    }

    #[test]
    fn test_empty() {
        assert!(HardwareAuthToken::new(Vec::new()).is_empty());
        assert!(!HardwareAuthToken::new(vec![7]).is_empty());
    }
}
