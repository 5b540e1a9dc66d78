// ── Floorplan export ──
//
// Walks the VisualRF topology (campus -> building -> floor), saves each
// floor's background image and records where access points are placed.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use centraldoc_api::{DataSource, endpoints};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::CoreError;
use crate::fetch::Fetcher;
use crate::model::{Building, Floor};
use crate::payload::{self, Payload};

/// Access points placed on one floor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FloorPlacement {
    pub floor_id: String,
    /// AP name -> AP id.
    pub aps: BTreeMap<String, String>,
}

/// Result of a floorplan export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FloorplanExport {
    /// Floor name -> placements.
    pub floors: BTreeMap<String, FloorPlacement>,
    /// Images written, in export order.
    pub images: Vec<PathBuf>,
}

fn metres() -> [(&'static str, String); 1] {
    [("units", "METERS".to_owned())]
}

/// `<images>/<building>_floor_<level>.png`
pub fn floor_image_path(images_dir: &Path, building: &Building, floor: &Floor) -> PathBuf {
    let building_name = building
        .building_name
        .as_deref()
        .unwrap_or(&building.building_id)
        .replace(['/', '\\'], "_");
    let level = floor.floor_level.as_deref().unwrap_or_default();
    images_dir.join(format!("{building_name}_floor_{level}.png"))
}

/// Export every campus's floorplans into `images_dir`.
///
/// A floor whose image or placements cannot be fetched is logged and
/// skipped; only an unusable campus listing or a fatal error fails the
/// export.
pub async fn export_floorplans<S: DataSource + Sync>(
    fetcher: &Fetcher<S>,
    images_dir: &Path,
) -> Result<FloorplanExport, CoreError> {
    let campus_path = endpoints::campuses();
    let campuses = payload::campuses(fetcher.fetch(&campus_path, &[]).await?)
        .into_result(&campus_path)?;

    let mut export = FloorplanExport::default();
    for campus in campuses {
        let buildings = match payload::buildings(
            fetcher.fetch(&endpoints::campus(&campus.campus_id), &[]).await?,
        ) {
            Payload::Parsed(buildings) => buildings,
            Payload::Malformed(raw) => {
                warn!(campus = %campus.campus_id, payload = %raw, "no buildings for campus");
                continue;
            }
        };

        for building in buildings {
            let floors = match payload::floors(
                fetcher
                    .fetch(&endpoints::building(&building.building_id), &metres())
                    .await?,
            ) {
                Payload::Parsed(floors) => floors,
                Payload::Malformed(raw) => {
                    warn!(building = %building.building_id, payload = %raw, "no floors for building");
                    continue;
                }
            };

            for floor in floors {
                match export_floor(fetcher, images_dir, &building, &floor, &mut export).await {
                    Ok(()) => {}
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => warn!(floor = %floor.floor_id, error = %e, "floor skipped"),
                }
            }
        }
    }

    info!(
        floors = export.floors.len(),
        images = export.images.len(),
        "floorplan export finished"
    );
    Ok(export)
}

async fn export_floor<S: DataSource + Sync>(
    fetcher: &Fetcher<S>,
    images_dir: &Path,
    building: &Building,
    floor: &Floor,
    export: &mut FloorplanExport,
) -> Result<(), CoreError> {
    let floor_name = floor
        .floor_name
        .clone()
        .unwrap_or_else(|| floor.floor_id.clone());

    let image_path = endpoints::floor_image(&floor.floor_id);
    let encoded = payload::floor_image(fetcher.fetch(&image_path, &[]).await?)
        .into_result(&image_path)?;
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| CoreError::malformed(&image_path, format!("invalid base64 image: {e}")))?;

    let target = floor_image_path(images_dir, building, floor);
    std::fs::create_dir_all(images_dir)?;
    std::fs::write(&target, bytes)?;
    info!(floor = %floor_name, image = %target.display(), "floorplan saved");
    export.images.push(target);

    let location_path = endpoints::floor_ap_locations(&floor.floor_id);
    let placements = payload::ap_locations(fetcher.fetch(&location_path, &metres()).await?)
        .into_result(&location_path)?;

    let entry = export
        .floors
        .entry(floor_name)
        .or_insert_with(|| FloorPlacement {
            floor_id: floor.floor_id.clone(),
            aps: BTreeMap::new(),
        });
    for ap in placements {
        let name = ap.ap_name.unwrap_or_else(|| ap.ap_id.clone());
        entry.aps.insert(name, ap.ap_id);
    }
    Ok(())
}
