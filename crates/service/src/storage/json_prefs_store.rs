use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError, RwLock},
    thread::JoinHandle,
};

use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::KeyValueStore;
use crate::errors::StoreError;

type Prefs = BTreeMap<String, String>;

/// In-memory map plus the number of updates applied to it.
#[derive(Debug, Default)]
struct State {
    version: u64,
    map: Prefs,
}

#[derive(Debug)]
struct Snapshot {
    version: u64,
    map: Prefs,
}

/// The file on disk and the newest snapshot version written to it.
#[derive(Debug)]
struct FileSink {
    path: PathBuf,
    written: Mutex<u64>,
}

impl FileSink {
    /// Write `snapshot` unless a newer one already landed. `force` also
    /// rewrites a snapshot equal to the last one written.
    fn persist(&self, snapshot: &Snapshot, force: bool) -> Result<(), StoreError> {
        let mut written = self.written.lock().unwrap_or_else(PoisonError::into_inner);
        if snapshot.version < *written || (!force && snapshot.version == *written) {
            return Ok(());
        }
        write_atomic(&self.path, &snapshot.map)?;
        *written = snapshot.version;
        Ok(())
    }
}

/// Named private preferences file: a JSON object of string keys to string values.
///
/// The whole map is held in memory. `set` updates it and hands a snapshot to a
/// background writer thread, so callers never wait on disk I/O; failures there
/// are logged. [`JsonPrefsStore::commit`] writes synchronously and reports
/// errors. Dropping the store drains pending writes.
#[derive(Debug)]
pub struct JsonPrefsStore {
    state: RwLock<State>,
    sink: Arc<FileSink>,
    tx: Option<mpsc::UnboundedSender<Snapshot>>,
    writer: Option<JoinHandle<()>>,
}

impl JsonPrefsStore {
    /// Open the store at `path`. Creates the file with an empty map if missing;
    /// any other read failure is returned and the path is left alone.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, StoreError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::storage("create preferences dir", e))?;
            }
        }

        let map = match fs::read(&file_path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %file_path.display(), error = %e, "preferences file unreadable; starting empty");
                Prefs::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let empty = Prefs::new();
                write_atomic(&file_path, &empty)?;
                empty
            }
            Err(e) => return Err(StoreError::storage("read preferences", e)),
        };

        debug!(path = %file_path.display(), keys = map.len(), "preferences opened");
        let sink = Arc::new(FileSink { path: file_path, written: Mutex::new(0) });
        let (tx, rx) = mpsc::unbounded_channel();
        let writer = std::thread::Builder::new()
            .name("prefs-writer".into())
            .spawn({
                let sink = Arc::clone(&sink);
                move || run_writer(sink, rx)
            })
            .map_err(|e| StoreError::storage("spawn preferences writer", e))?;

        Ok(Self {
            state: RwLock::new(State { version: 0, map }),
            sink,
            tx: Some(tx),
            writer: Some(writer),
        })
    }

    /// Open `<dir>/<name>.json`.
    pub fn open_named(dir: impl AsRef<Path>, name: &str) -> Result<Self, StoreError> {
        Self::open(dir.as_ref().join(format!("{name}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.sink.path
    }

    /// Write the current map to disk now and report failures.
    pub fn commit(&self) -> Result<(), StoreError> {
        let snapshot = self.snapshot();
        self.sink.persist(&snapshot, true)
    }

    fn snapshot(&self) -> Snapshot {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Snapshot { version: state.version, map: state.map.clone() }
    }
}

impl KeyValueStore for JsonPrefsStore {
    fn get(&self, key: &str) -> Option<String> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.map.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.map.insert(key.to_string(), value);
        state.version += 1;
        let snapshot = Snapshot { version: state.version, map: state.map.clone() };
        drop(state);

        let queued = self.tx.as_ref().is_some_and(|tx| tx.send(snapshot).is_ok());
        if !queued {
            warn!(path = %self.sink.path.display(), %key, "preferences writer stopped; change kept in memory only");
        }
    }
}

impl Drop for JsonPrefsStore {
    fn drop(&mut self) {
        // closing the channel lets the writer drain the queue and exit
        self.tx.take();
        if let Some(writer) = self.writer.take() {
            if writer.join().is_err() {
                warn!(path = %self.sink.path.display(), "preferences writer panicked");
            }
        }
    }
}

fn run_writer(sink: Arc<FileSink>, mut rx: mpsc::UnboundedReceiver<Snapshot>) {
    while let Some(mut snapshot) = rx.blocking_recv() {
        // only the newest queued snapshot needs to hit the disk
        while let Ok(next) = rx.try_recv() {
            snapshot = next;
        }
        if let Err(e) = sink.persist(&snapshot, false) {
            warn!(path = %sink.path.display(), error = %e, "failed to persist preferences");
        }
    }
}

fn write_atomic(path: &Path, map: &Prefs) -> Result<(), StoreError> {
    let data = serde_json::to_vec(map).map_err(StoreError::Serialization)?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, data).map_err(|e| StoreError::storage("write preferences", e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::storage("replace preferences", e))?;
    Ok(())
}
