// centraldoc-core: Aggregation, indexing and report composition for Aruba Central documentation.

pub mod artifacts;
pub mod batch;
pub mod compose;
pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod floorplan;
pub mod index;
pub mod model;
pub mod payload;

// ── Primary re-exports ──────────────────────────────────────────────
pub use artifacts::{ArtifactLookup, ArtifactQuery, FsArtifacts};
pub use batch::{Batch, BatchSummary, ReportKind, ReportOutcome, ReportStatus};
pub use compose::{DeviceDetail, ReportContext};
pub use config::{BatchConfig, ConnectionConfig, Customer, DocumentSettings, Paging, Selection};
pub use document::{Block, ComposedDocument, Conversion, DocumentWriter, DocxWriter};
pub use error::CoreError;
pub use fetch::{Fetcher, RetryPolicy};
pub use floorplan::{FloorPlacement, FloorplanExport, export_floorplans};
pub use index::{Hierarchy, Registry};
pub use payload::{Page, Payload};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ApLocation, Building, Campus, DeviceRecord, Floor, InventoryDevice, MonitoredAp,
    RadioInterface, RfProfile, Site, Subscription, Wlan,
};
