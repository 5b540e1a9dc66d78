#![allow(clippy::unwrap_used)]
// VisualRF floorplan export against a scripted data source.

mod common;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use centraldoc_api::endpoints;
use centraldoc_core::{CoreError, export_floorplans};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use common::{ScriptedSource, fetcher};

const IMAGE: &[u8] = b"\x89PNG\r\n\x1a\nfloor";

fn topology() -> ScriptedSource {
    ScriptedSource::new()
        .ok(
            endpoints::campuses(),
            json!({ "campus": [{ "campus_id": "c1", "campus_name": "Main" }] }),
        )
        .ok(
            endpoints::campus("c1"),
            json!({ "buildings": [{ "building_id": "b1", "building_name": "HQ" }] }),
        )
        .ok(
            endpoints::building("b1"),
            json!({ "floors": [
                { "floor_id": "f0", "floor_name": "Ground", "floor_level": "0" },
                { "floor_id": "f1", "floor_name": "First", "floor_level": "1" }
            ] }),
        )
        .ok(
            endpoints::floor_image("f0"),
            Value::String(STANDARD.encode(IMAGE)),
        )
        .ok(
            endpoints::floor_ap_locations("f0"),
            json!({ "access_points": [
                { "ap_id": "ap-1", "ap_name": "lobby" },
                { "ap_id": "ap-2" }
            ] }),
        )
}

#[tokio::test]
async fn floors_are_saved_and_placements_recorded() {
    let tmp = tempfile::tempdir().unwrap();
    let source = topology()
        .ok(
            endpoints::floor_image("f1"),
            Value::String(STANDARD.encode(IMAGE)),
        )
        .ok(
            endpoints::floor_ap_locations("f1"),
            json!({ "access_points": [] }),
        );

    let export = export_floorplans(&fetcher(source), tmp.path()).await.unwrap();

    assert_eq!(
        export.images,
        vec![
            tmp.path().join("HQ_floor_0.png"),
            tmp.path().join("HQ_floor_1.png"),
        ]
    );
    assert_eq!(std::fs::read(&export.images[0]).unwrap(), IMAGE);

    let ground = &export.floors["Ground"];
    assert_eq!(ground.floor_id, "f0");
    assert_eq!(ground.aps.get("lobby").map(String::as_str), Some("ap-1"));
    // Unnamed APs are keyed by their id.
    assert_eq!(ground.aps.get("ap-2").map(String::as_str), Some("ap-2"));
    assert!(export.floors["First"].aps.is_empty());
}

#[tokio::test]
async fn a_floor_without_image_is_skipped() {
    let tmp = tempfile::tempdir().unwrap();
    // f1 has no image route, so it answers 404.
    let source = topology();

    let export = export_floorplans(&fetcher(source), tmp.path()).await.unwrap();

    assert_eq!(export.images, vec![tmp.path().join("HQ_floor_0.png")]);
    assert!(export.floors.contains_key("Ground"));
    assert!(!export.floors.contains_key("First"));
    assert!(!tmp.path().join("HQ_floor_1.png").exists());
}

#[tokio::test]
async fn floor_requests_ask_for_metric_units() {
    let tmp = tempfile::tempdir().unwrap();
    let source = topology();
    let fetcher = fetcher(source);

    export_floorplans(&fetcher, tmp.path()).await.unwrap();

    let calls = fetcher.source().calls();
    assert!(calls.contains(&format!("{}?units=METERS", endpoints::building("b1"))));
    assert!(calls.contains(&format!(
        "{}?units=METERS",
        endpoints::floor_ap_locations("f0")
    )));
}

#[tokio::test]
async fn rejected_credentials_abort_the_export() {
    let tmp = tempfile::tempdir().unwrap();
    let source = ScriptedSource::new().fail(
        endpoints::campuses(),
        centraldoc_api::Error::Authentication {
            message: "token expired".into(),
        },
    );

    let err = export_floorplans(&fetcher(source), tmp.path())
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
}
