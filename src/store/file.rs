use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{MeetupStore, StoreError, StoreResult};
use crate::context::RequestContext;
use crate::model::Meetup;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    meetups: Vec<Meetup>,
}

/// Store persisting every meetup into a single JSON document.
///
/// Writes go to `<path>.tmp` and are renamed over `<path>`, so readers see
/// either the previous or the new document. Read-modify-write cycles are
/// serialized by an internal lock and run on the blocking pool. The request
/// context is checked once more right before the rename; a cancelled write
/// removes its temp file and leaves `<path>` untouched.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MeetupStore for JsonFileStore {
    async fn create(&self, ctx: &RequestContext, meetup: Meetup) -> StoreResult<Meetup> {
        let path = self.path.clone();
        let lock = Arc::clone(&self.write_lock);
        let ctx = ctx.clone();

        run_blocking(move || {
            let _guard = lock
                .lock()
                .map_err(|_| StoreError::Unavailable("write lock poisoned".into()))?;

            let mut doc = read_document(&path)?;
            if doc.meetups.iter().any(|m| m.id == meetup.id) {
                return Err(StoreError::DuplicateId(meetup.id));
            }
            doc.meetups.push(meetup.clone());
            write_document(&path, &doc, &ctx)?;
            Ok(meetup)
        })
        .await
    }

    async fn list_all(&self) -> StoreResult<Vec<Meetup>> {
        let path = self.path.clone();
        run_blocking(move || read_document(&path).map(|doc| doc.meetups)).await
    }
}

async fn run_blocking<T, F>(f: F) -> StoreResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> StoreResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!(error = %e, "file store task failed");
        StoreError::Unavailable(format!("store task failed: {e}"))
    })?
}

fn read_document(path: &Path) -> StoreResult<StoreDocument> {
    match fs::File::open(path) {
        Ok(file) => Ok(serde_json::from_reader(std::io::BufReader::new(file))?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StoreDocument::default()),
        Err(e) => Err(e.into()),
    }
}

fn write_document(path: &Path, doc: &StoreDocument, ctx: &RequestContext) -> StoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let committed = write_temp(&tmp_path, doc).and_then(|()| {
        if ctx.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        fs::rename(&tmp_path, path).map_err(StoreError::from)
    });

    if committed.is_err() {
        if let Err(e) = fs::remove_file(&tmp_path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %tmp_path.display(), error = %e, "could not remove temp file");
            }
        }
    }
    committed
}

fn write_temp(tmp_path: &Path, doc: &StoreDocument) -> StoreResult<()> {
    let mut file = fs::File::create(tmp_path)?;
    serde_json::to_writer_pretty(&mut file, doc)?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    Ok(())
}
