use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;
use validator::Validate;

use crate::models::{Dataset, Student, StudentRequest, Tutor, TutorRequest};

/// Errors that can occur with repository operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Consistent view of both collections at one revision
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub revision: u64,
    pub tutors: Vec<Tutor>,
    pub students: Vec<Student>,
}

/// Tutor and student repository
///
/// Holds both collections in memory and, when a data file is configured,
/// mirrors every write to it as a single JSON document. A write is staged on
/// a copy, saved, and only then swapped in, so a failed save or a rejected
/// import leaves the previous state untouched.
pub struct DataStore {
    state: RwLock<Dataset>,
    revision: AtomicU64,
    path: Option<PathBuf>,
}

impl DataStore {
    /// Create an empty store without file persistence
    pub fn in_memory() -> Self {
        Self::from_parts(Dataset::default(), None)
    }

    /// Create a store preloaded with `dataset`, without file persistence
    pub fn with_dataset(dataset: Dataset) -> Self {
        Self::from_parts(dataset, None)
    }

    /// Open a file-backed store, loading the file if it already exists
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let dataset = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No data file at {}, starting empty", path.display());
                Dataset::default()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            "Loaded {} tutors and {} students from {}",
            dataset.tutors.len(),
            dataset.students.len(),
            path.display()
        );

        Ok(Self::from_parts(dataset, Some(path)))
    }

    fn from_parts(dataset: Dataset, path: Option<PathBuf>) -> Self {
        Self {
            state: RwLock::new(dataset),
            revision: AtomicU64::new(0),
            path,
        }
    }

    /// Counter bumped by every successful write
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.read().await;
        Snapshot {
            revision: self.revision(),
            tutors: state.tutors.clone(),
            students: state.students.clone(),
        }
    }

    pub async fn tutors(&self) -> Vec<Tutor> {
        self.state.read().await.tutors.clone()
    }

    pub async fn students(&self) -> Vec<Student> {
        self.state.read().await.students.clone()
    }

    pub async fn get_student(&self, id: &str) -> Option<Student> {
        self.state
            .read()
            .await
            .students
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    pub async fn has_data(&self) -> bool {
        !self.state.read().await.is_empty()
    }

    pub async fn add_tutor(&self, tutor: Tutor) -> Result<Tutor, StoreError> {
        self.write(|data| {
            if data.tutors.iter().any(|t| t.id == tutor.id) {
                return Err(StoreError::DuplicateId(tutor.id.clone()));
            }
            data.tutors.push(tutor.clone());
            Ok(tutor)
        })
        .await
    }

    /// Replace a tutor's data, keeping its id and position
    pub async fn update_tutor(&self, id: &str, request: TutorRequest) -> Result<Tutor, StoreError> {
        self.write(|data| {
            let slot = data
                .tutors
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("tutor {}", id)))?;
            *slot = request.into_tutor(id.to_string());
            Ok(slot.clone())
        })
        .await
    }

    pub async fn delete_tutor(&self, id: &str) -> Result<Tutor, StoreError> {
        self.write(|data| {
            let index = data
                .tutors
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("tutor {}", id)))?;
            Ok(data.tutors.remove(index))
        })
        .await
    }

    pub async fn add_student(&self, student: Student) -> Result<Student, StoreError> {
        self.write(|data| {
            if data.students.iter().any(|s| s.id == student.id) {
                return Err(StoreError::DuplicateId(student.id.clone()));
            }
            data.students.push(student.clone());
            Ok(student)
        })
        .await
    }

    /// Replace a student's data, keeping its id and position
    pub async fn update_student(&self, id: &str, request: StudentRequest) -> Result<Student, StoreError> {
        self.write(|data| {
            let slot = data
                .students
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("student {}", id)))?;
            *slot = request.into_student(id.to_string());
            Ok(slot.clone())
        })
        .await
    }

    pub async fn delete_student(&self, id: &str) -> Result<Student, StoreError> {
        self.write(|data| {
            let index = data
                .students
                .iter()
                .position(|s| s.id == id)
                .ok_or_else(|| StoreError::NotFound(format!("student {}", id)))?;
            Ok(data.students.remove(index))
        })
        .await
    }

    pub async fn export(&self) -> Dataset {
        self.state.read().await.clone()
    }

    /// Replace both collections with `dataset`
    ///
    /// The document is validated as a whole first; any invalid record
    /// rejects the import without touching the current data.
    pub async fn import(&self, dataset: Dataset) -> Result<usize, StoreError> {
        validate_dataset(&dataset)?;
        let count = dataset.item_count();

        self.write(move |data| {
            *data = dataset;
            Ok(())
        })
        .await?;

        tracing::info!("Imported {} records", count);
        Ok(count)
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.write(|data| {
            *data = Dataset::default();
            Ok(())
        })
        .await
    }

    /// Install `dataset` when the store holds no records at all
    pub async fn seed_if_empty(&self, dataset: Dataset) -> Result<bool, StoreError> {
        let seeded = self
            .write(move |data| {
                if !data.is_empty() {
                    return Ok(false);
                }
                *data = dataset;
                Ok(true)
            })
            .await?;

        if seeded {
            tracing::info!("Seeded store with sample data");
        }
        Ok(seeded)
    }

    /// Apply `change` to a copy of the data, persist it, then publish it
    async fn write<T, F>(&self, change: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Dataset) -> Result<T, StoreError>,
    {
        let mut state = self.state.write().await;
        let mut next = state.clone();
        let value = change(&mut next)?;

        self.persist(&next).await?;

        *state = next;
        self.revision.fetch_add(1, Ordering::SeqCst);
        Ok(value)
    }

    async fn persist(&self, dataset: &Dataset) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(dataset)?;
        let staging = staging_path(path);
        tokio::fs::write(&staging, json).await?;
        tokio::fs::rename(&staging, path).await?;

        tracing::debug!("Saved data to {}", path.display());
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Check ids and form rules for every record of an import document
pub fn validate_dataset(dataset: &Dataset) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for tutor in &dataset.tutors {
        if tutor.id.trim().is_empty() {
            return Err(StoreError::InvalidRecord("tutor with empty id".to_string()));
        }
        if !seen.insert(tutor.id.as_str()) {
            return Err(StoreError::DuplicateId(format!("tutor {}", tutor.id)));
        }
        TutorRequest::from(tutor)
            .validate()
            .map_err(|e| StoreError::InvalidRecord(format!("tutor {}: {}", tutor.id, e)))?;
    }

    let mut seen = HashSet::new();
    for student in &dataset.students {
        if student.id.trim().is_empty() {
            return Err(StoreError::InvalidRecord("student with empty id".to_string()));
        }
        if !seen.insert(student.id.as_str()) {
            return Err(StoreError::DuplicateId(format!("student {}", student.id)));
        }
        StudentRequest::from(student)
            .validate()
            .map_err(|e| StoreError::InvalidRecord(format!("student {}: {}", student.id, e)))?;
    }

    Ok(())
}
