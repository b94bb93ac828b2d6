use std::collections::BTreeMap;

use granary_api::{
    AppendDataRequest, CreateDepotRequest, CreateGranaryRequest, GranaryConfigPatch,
    GranaryInfoPatch, Pagination,
};
use granary_server::configs::Pagination as PaginationSettings;
use granary_server::errors::ErrorKind;

mod common;
use common::mock_app::MockApp;

fn depot(name: &str) -> CreateDepotRequest {
    CreateDepotRequest {
        name: name.to_string(),
        address: None,
        contact_person: None,
        phone: None,
        province: Some("Heilongjiang".to_string()),
    }
}

fn granary(depot_id: i32, name: &str) -> CreateGranaryRequest {
    serde_json::from_value(serde_json::json!({
        "depot_id": depot_id,
        "name": name,
    }))
    .unwrap()
}

#[tokio::test]
async fn test_first_depot_gets_id_one() {
    let mock = MockApp::new().await;

    let north = mock
        .app
        .depots
        .create_depot(&mock.caller, depot("North"))
        .await
        .unwrap();

    assert_eq!(north.id, 1);
    assert_eq!(mock.app.depots.get_depot(1).await.unwrap(), north);
}

#[tokio::test]
async fn test_delete_depot_cascades() {
    let mock = MockApp::new().await;
    let caller = mock.caller;

    let north = mock.app.depots.create_depot(&caller, depot("North")).await.unwrap();
    let south = mock.app.depots.create_depot(&caller, depot("South")).await.unwrap();

    let doomed = mock
        .app
        .granaries
        .create_granary_aggregate(
            &caller,
            CreateGranaryRequest {
                config: Some(GranaryConfigPatch::default()),
                info: Some(GranaryInfoPatch::default()),
                ..granary(north.id, "A")
            },
        )
        .await
        .unwrap();
    let survivor = mock
        .app
        .granaries
        .create_granary_aggregate(&caller, granary(south.id, "B"))
        .await
        .unwrap();

    mock.app
        .data
        .append_granary_data(
            &caller,
            doomed.id,
            AppendDataRequest {
                collected_at: None,
                sequence: 1,
                temperatures: BTreeMap::from([("1".to_string(), 20.0)]),
                humidity: Some(55.0),
            },
        )
        .await
        .unwrap();

    mock.app.depots.delete_depot(&caller, north.id).await.unwrap();

    let error = mock.app.depots.get_depot(north.id).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);

    let error = mock
        .app
        .granaries
        .get_granary_aggregate(doomed.id)
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);

    let error = mock.app.configs.get_granary_config(doomed.id).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);
    let error = mock.app.infos.get_granary_info(doomed.id).await.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::NotFound);

    assert_eq!(mock.count("granary_configs").await, 0);
    assert_eq!(mock.count("granary_infos").await, 0);
    assert_eq!(mock.count("granary_data").await, 0);

    assert!(
        mock.app
            .granaries
            .get_granary_aggregate(survivor.id)
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn test_list_depot_granaries() {
    let mock = MockApp::new().await;
    let caller = mock.caller;

    let north = mock.app.depots.create_depot(&caller, depot("North")).await.unwrap();
    let south = mock.app.depots.create_depot(&caller, depot("South")).await.unwrap();

    for (depot_id, name) in [(north.id, "A"), (south.id, "B"), (north.id, "C")] {
        mock.app
            .granaries
            .create_granary_aggregate(&caller, granary(depot_id, name))
            .await
            .unwrap();
    }

    let granaries = mock.app.depots.list_depot_granaries(north.id).await.unwrap();
    let names: Vec<_> = granaries.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
    assert!(granaries.iter().all(|g| g.config.is_none() && g.info.is_none()));
}

#[tokio::test]
async fn test_list_depots_respects_max_limit() {
    let mock = MockApp::with_pagination(PaginationSettings {
        default_limit: 2,
        max_limit: 3,
    })
    .await;

    for name in ["A", "B", "C", "D", "E"] {
        mock.app
            .depots
            .create_depot(&mock.caller, depot(name))
            .await
            .unwrap();
    }

    let page = mock.app.depots.list_depots(Pagination::default()).await.unwrap();
    assert_eq!(page.len(), 2);

    let page = mock.app.depots.list_depots(Pagination::new(1, 50)).await.unwrap();
    let names: Vec<_> = page.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["B", "C", "D"]);
}
