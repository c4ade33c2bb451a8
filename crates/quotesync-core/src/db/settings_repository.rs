//! Settings repository implementation

use crate::error::Result;
use crate::models::SyncSettings;
use rusqlite::{params, Connection, OptionalExtension};

const AUTO_SYNC_KEY: &str = "auto_sync";
const LAST_SYNC_AT_KEY: &str = "last_sync_at";

/// Trait for sync settings storage operations
pub trait SettingsRepository {
    /// Load settings from the database
    fn load(&self) -> Result<SyncSettings>;

    /// Save settings to the database
    fn save(&self, settings: &SyncSettings) -> Result<()>;
}

/// `SQLite` implementation of `SettingsRepository`
pub struct SqliteSettingsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteSettingsRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl SettingsRepository for SqliteSettingsRepository<'_> {
    fn load(&self) -> Result<SyncSettings> {
        let mut settings = SyncSettings::default();

        if let Some(value) = self.get_setting(AUTO_SYNC_KEY)? {
            settings.auto_sync_enabled = matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }

        // Unparseable timestamps read as "never synced"
        if let Some(value) = self.get_setting(LAST_SYNC_AT_KEY)? {
            settings.last_sync_at = value.trim().parse().ok().filter(|ts: &i64| *ts > 0);
        }

        Ok(settings)
    }

    fn save(&self, settings: &SyncSettings) -> Result<()> {
        self.set_setting(
            AUTO_SYNC_KEY,
            if settings.auto_sync_enabled {
                "true"
            } else {
                "false"
            },
        )?;
        match settings.last_sync_at {
            Some(timestamp) => self.set_setting(LAST_SYNC_AT_KEY, &timestamp.to_string())?,
            None => {
                self.conn.execute(
                    "DELETE FROM settings WHERE key = ?",
                    params![LAST_SYNC_AT_KEY],
                )?;
            }
        }
        Ok(())
    }
}

impl SqliteSettingsRepository<'_> {
    fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?, ?)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn setup() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_load_default_settings() {
        let db = setup();
        let repo = SqliteSettingsRepository::new(db.connection());

        let settings = repo.load().unwrap();
        assert!(!settings.auto_sync_enabled);
        assert_eq!(settings.last_sync_at, None);
    }

    #[test]
    fn test_save_and_load_settings() {
        let db = setup();
        let repo = SqliteSettingsRepository::new(db.connection());

        let settings = SyncSettings {
            auto_sync_enabled: true,
            last_sync_at: Some(1_700_000_000_000),
        };
        repo.save(&settings).unwrap();

        assert_eq!(repo.load().unwrap(), settings);

        repo.save(&SyncSettings::default()).unwrap();
        assert_eq!(repo.load().unwrap(), SyncSettings::default());
    }

    #[test]
    fn test_garbage_timestamp_reads_as_never() {
        let db = setup();
        let repo = SqliteSettingsRepository::new(db.connection());

        repo.set_setting(LAST_SYNC_AT_KEY, "yesterday").unwrap();
        assert_eq!(repo.load().unwrap().last_sync_at, None);
    }
}
