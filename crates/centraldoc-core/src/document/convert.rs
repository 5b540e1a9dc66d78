// ── Fixed-layout conversion ──
//
// Hands a written .docx to an office suite running headless and expects a
// sibling .pdf back.

use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info};

use crate::error::CoreError;

pub const DEFAULT_CONVERTER: &str = "soffice";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    Disabled,
    /// `<program> --headless --convert-to pdf --outdir <dir> <file>`
    Office { program: String },
}

impl Default for Conversion {
    fn default() -> Self {
        Self::Office {
            program: DEFAULT_CONVERTER.into(),
        }
    }
}

impl Conversion {
    /// Convert `document` and return the path of the produced PDF, or
    /// `None` when conversion is disabled.
    pub async fn convert(&self, document: &Path) -> Result<Option<PathBuf>, CoreError> {
        let Self::Office { program } = self else {
            return Ok(None);
        };

        let outdir = document
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let failed = |message: String| CoreError::Conversion {
            path: document.to_path_buf(),
            message,
        };

        info!(document = %document.display(), "Convert docx to pdf");
        let output = Command::new(program)
            .arg("--headless")
            .arg("--convert-to")
            .arg("pdf")
            .arg("--outdir")
            .arg(outdir)
            .arg(document)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| failed(format!("cannot run {program}: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(failed(format!(
                "{program} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let pdf = document.with_extension("pdf");
        if !pdf.is_file() {
            return Err(failed(format!("{program} produced no {}", pdf.display())));
        }
        debug!(pdf = %pdf.display(), "conversion finished");
        Ok(Some(pdf))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_conversion_is_a_no_op() {
        let result = Conversion::Disabled
            .convert(Path::new("out/site.docx"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn missing_converter_is_reported() {
        let conversion = Conversion::Office {
            program: "centraldoc-no-such-converter".into(),
        };
        let err = conversion
            .convert(Path::new("out/site.docx"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conversion { .. }), "{err:?}");
        assert!(!err.is_fatal());
    }
}
