use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::{MorsimpleError, Result};
use crate::models::{Account, Activity, BalanceEntry};

/// Fetched API payloads laid out on disk by the companion fetch tool:
///
///   accounts.json
///   activities/<account id>.json
///   balances/<account id>.json
pub struct Snapshot {
    root: PathBuf,
}

impl Snapshot {
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(MorsimpleError::MissingSnapshot(root.display().to_string()));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// All accounts in the snapshot. accounts.json is required.
    pub fn accounts(&self) -> Result<Vec<Account>> {
        let path = self.root.join("accounts.json");
        if !path.exists() {
            return Err(MorsimpleError::MissingSnapshot(path.display().to_string()));
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Activities for one account, newest first as fetched. None when the
    /// account has no activity file, so the caller can warn and move on.
    pub fn activities(&self, account_id: &str) -> Result<Option<Vec<Activity>>> {
        read_list(&self.root.join("activities").join(format!("{account_id}.json")))
    }

    /// Balance history for one account. None when absent.
    pub fn balances(&self, account_id: &str) -> Result<Option<Vec<BalanceEntry>>> {
        read_list(&self.root.join("balances").join(format!("{account_id}.json")))
    }
}

fn read_list<T: DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// True when the YYYY-MM-DD date part of `raw` falls inside the closed
/// range. Bounds are YYYY-MM-DD strings; the comparison is lexicographic,
/// which is correct for that shape.
pub fn in_range(raw: &str, from: Option<&str>, to: Option<&str>) -> bool {
    let date = raw.split('T').next().unwrap_or(raw);
    if let Some(from) = from {
        if date < from {
            return false;
        }
    }
    if let Some(to) = to {
        if date > to {
            return false;
        }
    }
    true
}
