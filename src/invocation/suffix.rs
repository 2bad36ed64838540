//! Collision-resistant suffix for result logs and report directories.

use std::fmt;

use chrono::Local;
use uuid::Uuid;

const RANDOM_LEN: usize = 8;

/// `<YYYYmmdd_HHMMSS>_<8 hex chars>`; sorts by creation second.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UniqueSuffix(String);

impl UniqueSuffix {
    pub fn generate() -> Self {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let random = Uuid::new_v4().simple().to_string();
        Self(format!("{}_{}", timestamp, &random[..RANDOM_LEN]))
    }

    /// Fixed suffix, for reproducible plans.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UniqueSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_shape() {
        let s = UniqueSuffix::generate();
        let parts: Vec<&str> = s.as_str().split('_').collect();
        assert_eq!(parts.len(), 3, "got {}", s);
        assert_eq!(parts[0].len(), 8);
        assert_eq!(parts[1].len(), 6);
        assert!(parts[0].chars().chain(parts[1].chars()).all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), RANDOM_LEN);
        assert!(parts[2].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_same_second_still_differs() {
        let a = UniqueSuffix::generate();
        let b = UniqueSuffix::generate();
        assert_ne!(a, b);
    }
}
