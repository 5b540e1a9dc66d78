// ── Word document writer ──
//
// Renders a `ComposedDocument` into a .docx package with `docx-rs`. When a
// template is configured its styles and body seed every document. Missing
// pictures and sub-documents are logged and skipped; they never fail a
// report.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use docx_rs::{
    AlignmentType, BreakType, DocumentChild, Docx, Pic, Run, RunFonts, TableCell, TableRow,
    read_docx,
};
use tracing::{debug, info, warn};

use super::{Block, CellContent, ComposedDocument, DocumentWriter, Paragraph, Picture, Table};
use crate::error::CoreError;

const MONOSPACE_FONT: &str = "Consolas";
const EMU_PER_MM: u32 = 36_000;
const TWIPS_PER_MM: f32 = 56.7;

/// `.docx` writer, optionally seeded from a template document.
#[derive(Debug, Clone, Default)]
pub struct DocxWriter {
    template: Option<Vec<u8>>,
}

impl DocxWriter {
    /// Writer that starts every document blank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer seeded from `template` when it exists; a missing template
    /// falls back to a blank document.
    pub fn with_template(template: Option<&Path>) -> Result<Self, CoreError> {
        let Some(path) = template else {
            return Ok(Self::new());
        };
        if !path.is_file() {
            info!(template = %path.display(), "template not found, using a blank document");
            return Ok(Self::new());
        }

        let bytes = fs::read(path)?;
        read_docx(&bytes).map_err(|e| CoreError::Document {
            path: path.to_path_buf(),
            message: format!("unreadable template: {e}"),
        })?;
        debug!(template = %path.display(), "loaded document template");
        Ok(Self {
            template: Some(bytes),
        })
    }

    fn seed(&self, target: &Path) -> Result<Docx, CoreError> {
        match &self.template {
            Some(bytes) => read_docx(bytes).map_err(|e| CoreError::Document {
                path: target.to_path_buf(),
                message: format!("unreadable template: {e}"),
            }),
            None => Ok(Docx::new()),
        }
    }
}

impl DocumentWriter for DocxWriter {
    fn save(&self, document: &ComposedDocument, path: &Path) -> Result<(), CoreError> {
        let mut docx = self.seed(path)?;
        for block in document.blocks() {
            docx = render_block(docx, block);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(path)?;
        docx.build().pack(file).map_err(|e| CoreError::Document {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        info!(document = %path.display(), "document written");
        Ok(())
    }
}

// ── Block rendering ─────────────────────────────────────────────────

fn render_block(docx: Docx, block: &Block) -> Docx {
    match block {
        Block::Paragraph(p) => docx.add_paragraph(paragraph(p)),
        Block::Table(t) => docx.add_table(table(t)),
        Block::Picture(pic) => match picture(pic) {
            Some(image) => docx.add_paragraph(
                docx_rs::Paragraph::new()
                    .align(AlignmentType::Center)
                    .add_run(Run::new().add_image(image)),
            ),
            None => docx,
        },
        Block::PictureRow(pictures) => {
            let mut run = Run::new();
            let mut placed = 0;
            for image in pictures.iter().filter_map(picture) {
                if placed > 0 {
                    run = run.add_text(" ");
                }
                run = run.add_image(image);
                placed += 1;
            }
            if placed == 0 {
                return docx;
            }
            docx.add_paragraph(docx_rs::Paragraph::new().add_run(run))
        }
        Block::PageBreak => docx.add_paragraph(
            docx_rs::Paragraph::new().add_run(Run::new().add_break(BreakType::Page)),
        ),
        Block::SubDocument(path) => append_sub_document(docx, path),
    }
}

fn paragraph(p: &Paragraph) -> docx_rs::Paragraph {
    let mut out = docx_rs::Paragraph::new();
    if let Some(style) = p.style {
        out = out.style(style.id());
    }
    if p.centered {
        out = out.align(AlignmentType::Center);
    }

    let mut run = Run::new();
    if p.monospace {
        run = run.fonts(
            RunFonts::new()
                .ascii(MONOSPACE_FONT)
                .hi_ansi(MONOSPACE_FONT)
                .cs(MONOSPACE_FONT),
        );
    }
    for (i, line) in p.text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line.trim_end_matches('\r'));
    }
    out.add_run(run)
}

fn table(t: &Table) -> docx_rs::Table {
    let rows = t
        .rows
        .iter()
        .map(|row| {
            TableRow::new(
                row.iter()
                    .map(|cell| {
                        let mut out = TableCell::new();
                        for content in &cell.content {
                            out = match content {
                                CellContent::Text(p) => out.add_paragraph(paragraph(p)),
                                CellContent::Table(nested) => out.add_table(table(nested)),
                            };
                        }
                        // A cell must end with a paragraph.
                        if matches!(cell.content.last(), None | Some(CellContent::Table(_))) {
                            out = out.add_paragraph(docx_rs::Paragraph::new());
                        }
                        if cell.span > 1 {
                            out = out.grid_span(cell.span);
                        }
                        out
                    })
                    .collect(),
            )
        })
        .collect();

    let mut out = docx_rs::Table::new(rows);
    if !t.columns_mm.is_empty() {
        out = out.set_grid(t.columns_mm.iter().map(|mm| twips(*mm)).collect());
    }
    out
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
fn twips(mm: u32) -> usize {
    (f64::from(mm) * f64::from(TWIPS_PER_MM)).round() as usize
}

/// Load, re-encode and scale one picture. `None` when the file is missing
/// or is not a readable image.
fn picture(pic: &Picture) -> Option<Pic> {
    let bytes = match fs::read(&pic.path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(picture = %pic.path.display(), error = %e, "picture not readable, skipping");
            return None;
        }
    };
    let decoded = match image::load_from_memory(&bytes) {
        Ok(img) => img,
        Err(e) => {
            warn!(picture = %pic.path.display(), error = %e, "picture not decodable, skipping");
            return None;
        }
    };

    let (width_px, height_px) = (decoded.width().max(1), decoded.height().max(1));
    let mut png = Cursor::new(Vec::new());
    if let Err(e) = decoded.write_to(&mut png, image::ImageFormat::Png) {
        warn!(picture = %pic.path.display(), error = %e, "picture not encodable, skipping");
        return None;
    }

    let width_emu = pic.width_mm.saturating_mul(EMU_PER_MM);
    let height_emu = scaled_height(width_emu, width_px, height_px);
    Some(Pic::new(png.get_ref()).size(width_emu, height_emu))
}

/// Height in EMU that keeps the aspect ratio at `width_emu`.
fn scaled_height(width_emu: u32, width_px: u32, height_px: u32) -> u32 {
    let scaled = u64::from(width_emu) * u64::from(height_px) / u64::from(width_px.max(1));
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Append the body of another .docx in place. Styles of the appended
/// document are not merged; the host's styles apply.
fn append_sub_document(mut docx: Docx, path: &Path) -> Docx {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(document = %path.display(), error = %e, "sub-document not readable, skipping");
            return docx;
        }
    };
    let sub = match read_docx(&bytes) {
        Ok(sub) => sub,
        Err(e) => {
            warn!(document = %path.display(), error = %e, "sub-document not parseable, skipping");
            return docx;
        }
    };

    let mut appended = 0usize;
    for child in sub.document.children {
        match child {
            DocumentChild::Paragraph(_) | DocumentChild::Table(_) => {
                docx.document.children.push(child);
                appended += 1;
            }
            _ => {}
        }
    }
    info!(document = %path.display(), blocks = appended, "appended sub-document");
    docx
}
