// Anonymous per-device identity.
// Format: "anon-<uuid>"

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::IdentityError;

const IDENTITY_FILE: &str = "identity.txt";
const IDENTITY_PREFIX: &str = "anon-";

/// Opaque identifier that scopes every persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the identity stored in `dir`, if any.
pub fn load_identity_at(dir: &Path) -> Result<Option<Identity>, IdentityError> {
    let path = dir.join(IDENTITY_FILE);
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let id = content.trim();
    if id.starts_with(IDENTITY_PREFIX) && id.len() > IDENTITY_PREFIX.len() {
        Ok(Some(Identity::new(id)))
    } else {
        Err(IdentityError::InvalidFormat(id.to_string()))
    }
}

/// Get or create the anonymous identity stored in `dir`.
/// Creates the directory and the identity file if they don't exist.
pub fn get_or_create_identity_at(dir: &Path) -> Result<Identity, IdentityError> {
    if let Some(identity) = load_identity_at(dir)? {
        return Ok(identity);
    }

    let identity = Identity::new(format!("{IDENTITY_PREFIX}{}", Uuid::new_v4()));
    fs::create_dir_all(dir)?;
    let mut file = fs::File::create(dir.join(IDENTITY_FILE))?;
    writeln!(file, "{identity}")?;

    tracing::info!(%identity, "created anonymous identity");
    Ok(identity)
}

/// Forget the stored identity. Returns whether one existed.
pub fn sign_out_at(dir: &Path) -> Result<bool, IdentityError> {
    match fs::remove_file(dir.join(IDENTITY_FILE)) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn identity_format() {
        let temp_dir = TempDir::new().unwrap();
        let identity = get_or_create_identity_at(temp_dir.path()).unwrap();

        assert!(identity.as_str().starts_with(IDENTITY_PREFIX));
        assert_eq!(identity.as_str().len(), IDENTITY_PREFIX.len() + 36);
    }

    #[test]
    fn identity_is_reused() {
        let temp_dir = TempDir::new().unwrap();
        let first = get_or_create_identity_at(temp_dir.path()).unwrap();
        let second = get_or_create_identity_at(temp_dir.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested/path");
        assert!(get_or_create_identity_at(&nested).is_ok());
        assert!(nested.join(IDENTITY_FILE).exists());
    }

    #[test]
    fn invalid_stored_identity_rejected() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(IDENTITY_FILE), "someone-else\n").unwrap();
        assert!(matches!(
            get_or_create_identity_at(temp_dir.path()),
            Err(IdentityError::InvalidFormat(_))
        ));
    }

    #[test]
    fn sign_out_removes_identity() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!sign_out_at(temp_dir.path()).unwrap());

        let first = get_or_create_identity_at(temp_dir.path()).unwrap();
        assert!(sign_out_at(temp_dir.path()).unwrap());
        assert_eq!(load_identity_at(temp_dir.path()).unwrap(), None);

        let second = get_or_create_identity_at(temp_dir.path()).unwrap();
        assert_ne!(first, second);
    }
}
