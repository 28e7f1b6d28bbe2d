//! Course Store: owns the in-memory catalog and its JSON file on disk.
//!
//! Append is a read-modify-write-persist sequence, so a single async mutex
//! serializes it: concurrent submissions cannot duplicate ids or drop each
//! other's writes. The file is replaced via a sibling temp file and a
//! rename, so a crash mid-write leaves the previous catalog intact.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::course::{Course, CourseDraft};

#[derive(Clone)]
pub struct CourseStore {
    courses: Arc<Mutex<Vec<Course>>>,
    path: Arc<PathBuf>,
}

impl CourseStore {
    /// Initializes the store from `path`. A missing file is an empty
    /// catalog; an unreadable or malformed file is fatal.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let courses = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<Course>>(&bytes).with_context(|| {
                format!("course file {} is not a valid course array", path.display())
            })?,
            Err(error) if error.kind() == ErrorKind::NotFound => Vec::new(),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read course file {}", path.display()));
            }
        };

        info!(count = courses.len(), file = %path.display(), "course catalog loaded");

        Ok(Self {
            courses: Arc::new(Mutex::new(courses)),
            path: Arc::new(path),
        })
    }

    /// All stored courses, in insertion order.
    pub async fn list(&self) -> Vec<Course> {
        self.courses.lock().await.clone()
    }

    /// Assigns the next id, appends the course, and persists the whole
    /// catalog. A failed write fails the request; the in-memory append is
    /// not rolled back, so retrying the persist is a matter of retrying
    /// the next submission.
    pub async fn append(&self, draft: CourseDraft) -> Result<Course> {
        let mut courses = self.courses.lock().await;

        let id = courses.iter().map(|course| course.id).max().unwrap_or(0) + 1;
        let course = draft.into_course(id);
        courses.push(course.clone());

        persist(&self.path, &courses).await?;
        debug!(id, "course appended");

        Ok(course)
    }
}

/// Whole-file overwrite via temp file + rename. Callers must hold the store
/// mutex: the sibling temp path is shared between writes.
async fn persist(path: &Path, courses: &[Course]) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(courses).context("failed to serialize course catalog")?;
    let tmp = path.with_extension("tmp");

    tokio::fs::write(&tmp, &bytes)
        .await
        .with_context(|| format!("failed to write course file {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("failed to replace course file {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str) -> CourseDraft {
        CourseDraft {
            name: name.to_string(),
            description: format!("all about {name}"),
            price: 49.99,
            in_stock: true,
        }
    }

    async fn fresh_store(dir: &tempfile::TempDir) -> CourseStore {
        CourseStore::load(dir.path().join("courses.json"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = fresh_store(&dir).await;
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_append_assigns_sequential_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = fresh_store(&dir).await;

        for expected in 1..=3u64 {
            let course = store.append(draft("rust")).await.unwrap();
            assert_eq!(course.id, expected);
        }

        let listed = store.list().await;
        assert_eq!(listed.len(), 3);
        assert!(listed.windows(2).all(|pair| pair[0].id < pair[1].id));
    }

    #[tokio::test]
    async fn test_restart_preserves_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.json");

        let store = CourseStore::load(&path).await.unwrap();
        store.append(draft("rust")).await.unwrap();
        store.append(draft("go")).await.unwrap();
        drop(store);

        let reopened = CourseStore::load(&path).await.unwrap();
        let listed = reopened.list().await;
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "rust");
        assert_eq!(listed[1].name, "go");
    }

    #[tokio::test]
    async fn test_next_id_skips_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.json");
        tokio::fs::write(
            &path,
            r#"[
                {"id": 1, "name": "a", "description": "a", "price": 1.0, "inStock": true},
                {"id": 7, "name": "b", "description": "b", "price": 2.0, "inStock": false}
            ]"#,
        )
        .await
        .unwrap();

        let store = CourseStore::load(&path).await.unwrap();
        let course = store.append(draft("c")).await.unwrap();
        assert_eq!(course.id, 8, "next id must be 1 + max, not 1 + len");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.json");
        tokio::fs::write(&path, "not a course array").await.unwrap();

        assert!(CourseStore::load(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_concurrent_appends_keep_ids_unique() {
        let dir = tempfile::tempdir().unwrap();
        let store = fresh_store(&dir).await;

        let mut handles = Vec::new();
        for n in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.append(draft(&format!("course-{n}"))).await.unwrap().id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=8).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_persisted_file_is_a_plain_course_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("courses.json");

        let store = CourseStore::load(&path).await.unwrap();
        store.append(draft("rust")).await.unwrap();

        let raw: serde_json::Value =
            serde_json::from_slice(&tokio::fs::read(&path).await.unwrap()).unwrap();
        assert!(raw.is_array());
        assert_eq!(raw[0]["inStock"], true);
        assert_eq!(raw[0]["id"], 1);
    }
}
