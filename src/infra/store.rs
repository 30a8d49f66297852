//! JSON persistence for the session and the wardrobe.
//!
//! Both files are written atomically: a temp file in the destination
//! directory is filled, synced and then renamed over the target.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::core::model::Wardrobe;
use crate::core::session::Session;
use crate::core::wardrobe::{default_wardrobe, repair_wardrobe};
use crate::infra::config::PrefDefaults;

#[derive(Debug, Error)]
pub enum StoreError
{
    #[error("failed to read {path}")]
    Read
    {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not valid JSON for a {what}")]
    Corrupt
    {
        path: PathBuf,
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write {path}")]
    Write
    {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize {what}")]
    Serialize
    {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Read a file, mapping "not found" to `None`
fn read_optional(path: &Path) -> Result<Option<String>, StoreError>
{
    match fs::read_to_string(path)
    {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(StoreError::Read { path: path.to_path_buf(), source }),
    }
}

/// Load the session, or start a fresh one seeded from `seeds`
#[instrument(skip(seeds))]
pub fn load_session(
    path: &Path,
    seeds: &PrefDefaults,
) -> Result<Session, StoreError>
{
    let Some(text) = read_optional(path)?
    else
    {
        debug!("no session file, starting fresh");
        return Ok(Session::with_prefs(seeds.preferences()));
    };

    serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
        path: path.to_path_buf(),
        what: "session",
        source,
    })
}

pub fn save_session(
    path: &Path,
    session: &Session,
) -> Result<(), StoreError>
{
    save_json(path, session, "session")
}

/// Load the wardrobe, repairing broken categories. A missing file yields
/// the built-in wardrobe; unparseable JSON is an error so the user's file
/// is never silently replaced.
#[instrument]
pub fn load_wardrobe(path: &Path) -> Result<Wardrobe, StoreError>
{
    let Some(text) = read_optional(path)?
    else
    {
        info!("no wardrobe file, using the built-in wardrobe");
        return Ok(default_wardrobe());
    };

    let value: serde_json::Value =
        serde_json::from_str(&text).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            what: "wardrobe",
            source,
        })?;

    Ok(repair_wardrobe(&value))
}

pub fn save_wardrobe(
    path: &Path,
    wardrobe: &Wardrobe,
) -> Result<(), StoreError>
{
    save_json(path, wardrobe, "wardrobe")
}

fn save_json<T: Serialize>(
    path: &Path,
    value: &T,
    what: &'static str,
) -> Result<(), StoreError>
{
    let mut data =
        serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serialize { what, source })?;
    data.push(b'\n');

    write_atomic(path, &data).map_err(|source| StoreError::Write { path: path.to_path_buf(), source })?;
    debug!(path = %path.display(), bytes = data.len(), "saved {what}");
    Ok(())
}

/// Replace `path` with `data` via a synced same-directory temp file
pub fn write_atomic(
    path: &Path,
    data: &[u8],
) -> io::Result<()>
{
    let dir = match path.parent()
    {
        Some(p) if !p
            .as_os_str()
            .is_empty() =>
        {
            p
        }
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file()
        .sync_all()?;

    tmp.persist(path)
        .map_err(|e| e.error)?;

    // fsync parent dir so the rename survives a crash
    #[cfg(unix)]
    {
        if let Ok(parent_file) = fs::File::open(dir)
        {
            let _ = parent_file.sync_all();
        }
    }

    Ok(())
}
