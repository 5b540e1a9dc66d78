// ── Composed document model ──
//
// Reports are composed as an ordered list of blocks, independent of the
// output format. A `DocumentWriter` turns the block list into a file; the
// composer never touches the filesystem beyond artifact discovery.

pub mod convert;
pub mod docx;

use std::path::{Path, PathBuf};

use crate::error::CoreError;

pub use convert::Conversion;
pub use docx::DocxWriter;

/// Width of a location snapshot.
pub const LOCATION_WIDTH_MM: u32 = 130;
/// Width of a device photo; two fit side by side.
pub const PHOTO_WIDTH_MM: u32 = 75;
/// Photos placed per row.
pub const PHOTOS_PER_ROW: usize = 2;

/// Paragraph styles, resolved to style ids of the seed template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    CoverTitle,
    CoverSubtitle,
    Heading,
    TableHead,
    TableBody,
}

impl Style {
    pub fn id(self) -> &'static str {
        match self {
            Self::CoverTitle => "Title",
            Self::CoverSubtitle => "Subtitle",
            Self::Heading => "Heading2",
            Self::TableHead => "TableRowhead",
            Self::TableBody => "TableBody",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Paragraph {
    pub text: String,
    pub style: Option<Style>,
    /// Rendered in a fixed-width font with line breaks kept.
    pub monospace: bool,
    pub centered: bool,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            style: Some(style),
            ..Self::new(text)
        }
    }

    pub fn monospace(text: impl Into<String>) -> Self {
        Self {
            monospace: true,
            style: Some(Style::TableBody),
            ..Self::new(text)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellContent {
    Text(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub content: Vec<CellContent>,
    /// Number of grid columns this cell covers.
    pub span: usize,
}

impl Cell {
    pub fn text(text: impl Into<String>, style: Style) -> Self {
        Self {
            content: vec![CellContent::Text(Paragraph::styled(text, style))],
            span: 1,
        }
    }

    pub fn table(table: Table) -> Self {
        Self {
            content: vec![CellContent::Table(table)],
            span: 1,
        }
    }

    #[must_use]
    pub fn spanning(mut self, span: usize) -> Self {
        self.span = span.max(1);
        self
    }

    /// Concatenated text of the cell, nested tables excluded.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .filter_map(|c| match c {
                CellContent::Text(p) => Some(p.text.as_str()),
                CellContent::Table(_) => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
    /// Column widths in millimetres; empty leaves layout to the renderer.
    pub columns_mm: Vec<u32>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn columns(mut self, widths_mm: &[u32]) -> Self {
        self.columns_mm = widths_mm.to_vec();
        self
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Append a `label: | value` row in the table's head/body styles.
    pub fn push_pair(&mut self, label: &str, value: impl Into<String>) {
        self.rows.push(vec![
            Cell::text(format!("{label}:"), Style::TableHead),
            Cell::text(value, Style::TableBody),
        ]);
    }

    /// Append a header row.
    pub fn push_header(&mut self, labels: &[&str]) {
        self.rows.push(
            labels
                .iter()
                .map(|l| Cell::text(*l, Style::TableHead))
                .collect(),
        );
    }

    /// Plain text of every cell, row by row.
    pub fn text_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(Cell::plain_text).collect())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub path: PathBuf,
    pub width_mm: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    /// A single centered picture.
    Picture(Picture),
    /// Pictures laid out side by side on one line.
    PictureRow(Vec<Picture>),
    PageBreak,
    /// Body of an externally authored document, appended in place.
    SubDocument(PathBuf),
}

/// Ordered block list for one report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComposedDocument {
    blocks: Vec<Block>,
}

impl ComposedDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn paragraph(&mut self, paragraph: Paragraph) {
        self.blocks.push(Block::Paragraph(paragraph));
    }

    pub fn table(&mut self, table: Table) {
        self.blocks.push(Block::Table(table));
    }

    pub fn page_break(&mut self) {
        self.blocks.push(Block::PageBreak);
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Text of every top-level paragraph, in order.
    pub fn paragraph_texts(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Paragraph(p) => Some(p.text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Persists a composed document.
pub trait DocumentWriter {
    fn save(&self, document: &ComposedDocument, path: &Path) -> Result<(), CoreError>;
}
