use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::{
    domain::{Contract, Owner, PaymentEntry, Property, Tenant},
    errors::{LedgerError, Result},
};

use super::{Collection, PaymentRepository, RecordSource};

const COLLECTION_EXTENSION: &str = "json";
const BACKUP_DIR: &str = "backups";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%6f";
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION: usize = 5;

/// Filesystem-backed store keeping one JSON array per collection.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStore {
    pub fn new(root: PathBuf, retention: Option<usize>) -> Result<Self> {
        let backups_dir = root.join(BACKUP_DIR);
        fs::create_dir_all(&root)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            root,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn collection_path(&self, collection: Collection) -> PathBuf {
        self.root
            .join(format!("{}.{}", collection.name(), COLLECTION_EXTENSION))
    }

    /// Reads a collection; a missing file is an empty collection.
    pub fn read_collection<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let path = self.collection_path(collection);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)
            .map_err(|err| LedgerError::StorageRead(format!("{}: {err}", path.display())))?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&data)
            .map_err(|err| LedgerError::StorageRead(format!("{}: {err}", path.display())))
    }

    /// Replaces a collection, keeping a timestamped copy of the previous file.
    pub fn write_collection<T: Serialize>(
        &self,
        collection: Collection,
        items: &[T],
    ) -> Result<()> {
        let path = self.collection_path(collection);
        self.backup_existing_file(collection, &path)?;
        let json = serde_json::to_string_pretty(items)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        debug!(collection = collection.name(), items = items.len(), "collection written");
        Ok(())
    }

    /// Backup files of `collection`, newest first.
    pub fn list_backups(&self, collection: Collection) -> Result<Vec<PathBuf>> {
        let prefix = format!("{}_", collection.name());
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(COLLECTION_EXTENSION) {
                continue;
            }
            let matches = path
                .file_name()
                .and_then(|name| name.to_str())
                .map_or(false, |name| name.starts_with(&prefix));
            if matches {
                entries.push(path);
            }
        }
        entries.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        Ok(entries)
    }

    fn backup_existing_file(&self, collection: Collection, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        fs::create_dir_all(&self.backups_dir)?;
        let backup_path = self.unique_backup_path(collection);
        fs::copy(path, &backup_path)?;
        debug!(backup = %backup_path.display(), "previous collection backed up");
        self.prune_backups(collection)
    }

    /// A backup path no existing file occupies.
    fn unique_backup_path(&self, collection: Collection) -> PathBuf {
        let stem = format!(
            "{}_{}",
            collection.name(),
            Utc::now().format(BACKUP_TIMESTAMP_FORMAT)
        );
        let mut candidate = self
            .backups_dir
            .join(format!("{stem}.{COLLECTION_EXTENSION}"));
        let mut counter = 1u32;
        while candidate.exists() {
            candidate = self
                .backups_dir
                .join(format!("{stem}_{counter:03}.{COLLECTION_EXTENSION}"));
            counter += 1;
        }
        candidate
    }

    fn prune_backups(&self, collection: Collection) -> Result<()> {
        for stale in self.list_backups(collection)?.into_iter().skip(self.retention) {
            let _ = fs::remove_file(stale);
        }
        Ok(())
    }
}

impl PaymentRepository for JsonStore {
    fn load(&self) -> Result<Vec<PaymentEntry>> {
        let records: Vec<PaymentEntry> = self.read_collection(Collection::Payments)?;
        let total = records.len();
        let stored: Vec<PaymentEntry> = records.into_iter().filter(|r| !r.generated).collect();
        if stored.len() != total {
            warn!(
                dropped = total - stored.len(),
                "ignoring generated entries found in the payments collection"
            );
        }
        Ok(stored)
    }

    fn save_all(&self, records: &[PaymentEntry]) -> Result<()> {
        let persistable: Vec<&PaymentEntry> = records.iter().filter(|r| !r.generated).collect();
        if persistable.len() != records.len() {
            warn!(
                dropped = records.len() - persistable.len(),
                "refusing to persist generated entries"
            );
        }
        self.write_collection(Collection::Payments, &persistable)
    }
}

impl RecordSource for JsonStore {
    fn contracts(&self) -> Result<Vec<Contract>> {
        self.read_collection(Collection::Contracts)
    }

    fn tenants(&self) -> Result<Vec<Tenant>> {
        self.read_collection(Collection::Tenants)
    }

    fn properties(&self) -> Result<Vec<Property>> {
        self.read_collection(Collection::Properties)
    }

    fn owners(&self) -> Result<Vec<Owner>> {
        self.read_collection(Collection::Owners)
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PaymentMethod, PaymentStatus};
    use chrono::NaiveDate;
    use tempfile::TempDir;
    use uuid::Uuid;

    fn store_with_temp_dir() -> (JsonStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonStore::new(temp.path().to_path_buf(), Some(2)).expect("json store");
        (store, temp)
    }

    fn sample_payment() -> PaymentEntry {
        PaymentEntry::stored(
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2025, 10, 16).unwrap(),
            100000.0,
            PaymentStatus::Paid,
            PaymentMethod::Cash,
        )
    }

    #[test]
    fn missing_collections_read_as_empty() {
        let (store, _guard) = store_with_temp_dir();
        assert!(PaymentRepository::load(&store).unwrap().is_empty());
        assert!(store.contracts().unwrap().is_empty());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let (store, _guard) = store_with_temp_dir();
        let payment = sample_payment();
        store.save_all(&[payment.clone()]).expect("save payments");
        assert_eq!(PaymentRepository::load(&store).unwrap(), vec![payment]);
    }

    #[test]
    fn malformed_collection_is_a_read_error() {
        let (store, _guard) = store_with_temp_dir();
        fs::write(store.collection_path(Collection::Payments), "{ not json").unwrap();
        let err = PaymentRepository::load(&store).unwrap_err();
        assert!(matches!(err, LedgerError::StorageRead(_)), "unexpected error: {err:?}");
    }

    #[test]
    fn overwrites_keep_bounded_backups() {
        let (store, _guard) = store_with_temp_dir();
        store.save_all(&[sample_payment()]).unwrap();
        store.save_all(&[sample_payment()]).unwrap();
        let backups = store.list_backups(Collection::Payments).unwrap();
        assert!(!backups.is_empty(), "second save should back up the first");
        assert!(backups.len() <= 2);
        assert!(store.list_backups(Collection::Contracts).unwrap().is_empty());
    }

    #[test]
    fn rapid_saves_never_overwrite_an_earlier_backup() {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonStore::new(temp.path().to_path_buf(), Some(10)).expect("json store");
        let path = store.collection_path(Collection::Payments);
        fs::write(&path, "first generation").unwrap();

        for _ in 0..4 {
            store.save_all(&[sample_payment()]).unwrap();
        }

        let backups = store.list_backups(Collection::Payments).unwrap();
        assert_eq!(backups.len(), 4);
        let oldest = backups.last().unwrap();
        assert_eq!(fs::read_to_string(oldest).unwrap(), "first generation");
    }
}
