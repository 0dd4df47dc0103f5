//! Local session storage.
//!
//! Persists the signed-in user, access token and a few cached values in
//! `<base>/session.json` with restricted permissions (0600). Tokens are
//! never logged or displayed in full.

use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::api::types::{Role, User, WalletBalance};
use crate::config::paths;

/// Session state persisted between runs.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionCache {
    /// Bearer token for authenticated API calls.
    pub access_token: Option<String>,
    /// The signed-in user as last reported by the server.
    pub user: Option<User>,
    /// Last wallet balance fetched, shown until a fresh value arrives.
    pub wallet_balance: Option<WalletBalance>,
    /// Ids of notifications the user has dismissed.
    pub read_notifications: BTreeSet<String>,
}

impl SessionCache {
    /// Returns true when a token and user are both present.
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }

    /// Role of the signed-in user, if any.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Replaces the signed-in identity after a successful login or verify.
    pub fn establish(&mut self, access_token: String, user: User) {
        self.access_token = Some(access_token);
        self.user = Some(user);
    }

    /// Marks a notification as read. Returns true if it was unread.
    pub fn mark_notification_read(&mut self, id: &str) -> bool {
        self.read_notifications.insert(id.to_string())
    }

    /// Whether a notification id has been dismissed before.
    pub fn is_notification_read(&self, id: &str) -> bool {
        self.read_notifications.contains(id)
    }

    /// Loads the session from the default path.
    /// Returns an empty session if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::session_path())
    }

    /// Loads the session from a specific path.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read session from {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse session from {}", path.display()))
    }

    /// Saves the session to the default path.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save(&self) -> Result<()> {
        self.save_to(&paths::session_path())
    }

    /// Saves the session with restricted permissions (0600).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize session")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(path)
                .with_context(|| format!("Failed to open {} for writing", path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }

        Ok(())
    }

    /// Deletes the session file at the default path.
    /// Succeeds if the file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn clear() -> Result<bool> {
        Self::clear_at(&paths::session_path())
    }

    /// Deletes the session file at a specific path.
    /// Returns true if a file was removed.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn clear_at(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(path)
            .with_context(|| format!("Failed to remove session at {}", path.display()))?;
        Ok(true)
    }
}

/// Returns a masked version of a token for display (first 8 chars + ...).
pub fn mask_token(token: &str) -> String {
    if token.len() <= 12 {
        return "***".to_string();
    }
    format!("{}...", &token[..8])
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::api::types::RegistrationStatus;

    fn sample_user() -> User {
        User {
            id: "u-1".to_string(),
            name: "Asha Verma".to_string(),
            email: "asha@example.com".to_string(),
            phone_number: "9876543210".to_string(),
            role: Role::TeamLead,
            registration_status: RegistrationStatus::Approved,
        }
    }

    /// A fresh session is unauthenticated.
    #[test]
    fn test_default_session_not_authenticated() {
        let session = SessionCache::default();
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), None);
    }

    /// establish() makes the session authenticated with the user's role.
    #[test]
    fn test_establish_sets_identity() {
        let mut session = SessionCache::default();
        session.establish("token-abc".to_string(), sample_user());

        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(Role::TeamLead));
    }

    /// load: missing file yields an empty session.
    #[test]
    fn test_load_missing_file_returns_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = SessionCache::load_from(&path).unwrap();
        assert!(!session.is_authenticated());
        assert!(session.read_notifications.is_empty());
    }

    /// save/load roundtrip preserves identity and cached values.
    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut session = SessionCache::default();
        session.establish("token-abc".to_string(), sample_user());
        session.wallet_balance = Some(WalletBalance {
            balance: 1240.5,
            currency: "INR".to_string(),
        });
        session.mark_notification_read("n-1");
        session.save_to(&path).unwrap();

        let loaded = SessionCache::load_from(&path).unwrap();
        assert!(loaded.is_authenticated());
        assert_eq!(loaded.access_token.as_deref(), Some("token-abc"));
        assert_eq!(loaded.role(), Some(Role::TeamLead));
        assert_eq!(loaded.wallet_balance.as_ref().unwrap().currency, "INR");
        assert!(loaded.is_notification_read("n-1"));
        assert!(!loaded.is_notification_read("n-2"));
    }

    /// save: parent directories are created as needed.
    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        SessionCache::default().save_to(&path).unwrap();
        assert!(path.exists());
    }

    /// save: the session file is private to the user.
    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        SessionCache::default().save_to(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    /// clear: removes the file and reports whether one existed.
    #[test]
    fn test_clear_removes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");

        SessionCache::default().save_to(&path).unwrap();
        assert!(SessionCache::clear_at(&path).unwrap());
        assert!(!path.exists());

        // Clearing again is fine
        assert!(!SessionCache::clear_at(&path).unwrap());
    }

    /// mark_notification_read reports first-time reads.
    #[test]
    fn test_mark_notification_read_idempotent() {
        let mut session = SessionCache::default();
        assert!(session.mark_notification_read("n-9"));
        assert!(!session.mark_notification_read("n-9"));
    }

    /// Token masking never reveals short tokens.
    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("cw-access-token-abcdef"), "cw-acces...");
        assert_eq!(mask_token("short"), "***");
    }
}
