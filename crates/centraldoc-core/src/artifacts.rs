// ── Local artifact discovery ──
//
// Location snapshots, device photos and per-site sub-documents are
// associated with reports purely by file name. Missing directories and
// missing files are normal: the lookup just comes back empty.

use std::path::{Path, PathBuf};

use tracing::debug;

/// What to look for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactQuery {
    /// `<images>/<site>/<serial>-*_location.png`
    LocationSnapshots { site: String, serial: String },
    /// `<images>/<site>/<serial>*.jpg`
    DevicePhotos { site: String, serial: String },
    /// `<bom>/<site>*.docx`
    SubDocuments { site: String },
}

/// Resolves artifact queries to ordered file paths.
pub trait ArtifactLookup {
    /// Matching files in ascending path order; empty when nothing matches.
    fn find_artifacts(&self, query: &ArtifactQuery) -> Vec<PathBuf>;
}

/// Filesystem-backed lookup rooted at the configured image and
/// sub-document directories.
#[derive(Debug, Clone)]
pub struct FsArtifacts {
    images_dir: PathBuf,
    bom_dir: PathBuf,
}

impl FsArtifacts {
    pub fn new(images_dir: impl Into<PathBuf>, bom_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
            bom_dir: bom_dir.into(),
        }
    }
}

impl ArtifactLookup for FsArtifacts {
    fn find_artifacts(&self, query: &ArtifactQuery) -> Vec<PathBuf> {
        match query {
            ArtifactQuery::LocationSnapshots { site, serial } => matching(
                &self.images_dir.join(site),
                &format!("{serial}-"),
                "_location.png",
            ),
            ArtifactQuery::DevicePhotos { site, serial } => {
                matching(&self.images_dir.join(site), serial, ".jpg")
            }
            ArtifactQuery::SubDocuments { site } => matching(&self.bom_dir, site, ".docx"),
        }
    }
}

/// Files directly in `dir` whose name starts with `prefix` and ends with
/// `suffix`, sorted ascending.
fn matching(dir: &Path, prefix: &str, suffix: &str) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "artifact directory not readable");
            return Vec::new();
        }
    };

    let mut found: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            (name.len() >= prefix.len() + suffix.len()
                && name.starts_with(prefix)
                && name.ends_with(suffix))
            .then(|| entry.path())
        })
        .collect();
    found.sort();
    found
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn finds_location_snapshots_and_photos_by_serial() {
        let tmp = tempfile::tempdir().unwrap();
        let images = tmp.path().join("images");
        let site = images.join("HQ");
        touch(&site.join("SN1-2_location.png"));
        touch(&site.join("SN1-1_location.png"));
        touch(&site.join("SN1_front.jpg"));
        touch(&site.join("SN1.jpg"));
        touch(&site.join("SN2_front.jpg"));
        touch(&site.join("SN1-notes.txt"));

        let lookup = FsArtifacts::new(&images, tmp.path().join("bom"));

        let locations = lookup.find_artifacts(&ArtifactQuery::LocationSnapshots {
            site: "HQ".into(),
            serial: "SN1".into(),
        });
        assert_eq!(
            names(&locations),
            vec!["SN1-1_location.png", "SN1-2_location.png"]
        );

        let photos = lookup.find_artifacts(&ArtifactQuery::DevicePhotos {
            site: "HQ".into(),
            serial: "SN1".into(),
        });
        assert_eq!(names(&photos), vec!["SN1.jpg", "SN1_front.jpg"]);
    }

    #[test]
    fn finds_sub_documents_by_site_prefix() {
        let tmp = tempfile::tempdir().unwrap();
        let bom = tmp.path().join("bom");
        touch(&bom.join("HQ_bom.docx"));
        touch(&bom.join("HQ.docx"));
        touch(&bom.join("Branch_bom.docx"));

        let lookup = FsArtifacts::new(tmp.path().join("images"), &bom);
        let docs = lookup.find_artifacts(&ArtifactQuery::SubDocuments { site: "HQ".into() });

        assert_eq!(names(&docs), vec!["HQ.docx", "HQ_bom.docx"]);
    }

    #[test]
    fn missing_directories_yield_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let lookup = FsArtifacts::new(tmp.path().join("nope"), tmp.path().join("nada"));

        assert!(
            lookup
                .find_artifacts(&ArtifactQuery::SubDocuments { site: "HQ".into() })
                .is_empty()
        );
        assert!(
            lookup
                .find_artifacts(&ArtifactQuery::DevicePhotos {
                    site: "HQ".into(),
                    serial: "SN1".into(),
                })
                .is_empty()
        );
    }
}
