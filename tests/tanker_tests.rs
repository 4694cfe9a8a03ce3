use lims_client::labdata::LabSampleForm;
use lims_client::tanker::{ArrivalForm, DispatchForm, MovementType, TankerHistoryView};
use lims_client::Lims;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn history_is_derived_and_searchable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tanker/history/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "tanker_number": "TKR-00145",
                "movement_type": "ARRIVAL",
                "material_or_product": "Ammonia",
                "quantity": "18.5",
                "date": "2026-02-05",
                "time": "08:15",
                "batch_number": null,
                "source_destination": "Hazira Terminal"
            },
            {
                "tanker_number": "TKR-00990",
                "movement_type": "DISPATCH",
                "material_or_product": "Urea",
                "quantity": 22,
                "date": "2026-02-05",
                "time": "14:10",
                "batch_number": "B-774410",
                "source_destination": "Pune Depot"
            }
        ])))
        .mount(&server)
        .await;

    let lims = Lims::new(&server.uri()).unwrap();
    let mut view = TankerHistoryView::new();
    view.load(&lims.tanker()).await.unwrap();

    let entries = view.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].quantity, 18.5);
    assert_eq!(entries[0].batch_number, "");
    assert_eq!(entries[1].kind, MovementType::Dispatch);
    assert_eq!(entries[1].destination.as_deref(), Some("Pune Depot"));

    view.set_search("urea");
    let visible = view.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, 2);
    assert_eq!(visible[0].status, "Delivered");
}

#[tokio::test]
async fn history_failure_is_kept_on_the_view() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tanker/history/"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "ok": false,
            "error": "Database unavailable"
        })))
        .mount(&server)
        .await;

    let lims = Lims::new(&server.uri()).unwrap();
    let mut view = TankerHistoryView::new();
    assert!(view.load(&lims.tanker()).await.is_err());
    assert_eq!(view.error(), Some("Database unavailable"));
    assert!(view.entries().is_empty());
}

#[tokio::test]
async fn arrival_is_posted_and_form_cleared() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tanker/arrival/"))
        .and(body_json(json!({
            "tanker_number": "TKR-00145",
            "raw_material": "Ammonia",
            "quantity": 18.5,
            "supplier": "Hazira Terminal",
            "driver_name": "",
            "arrival_date": "2026-02-05",
            "arrival_time": "08:15",
            "sampling_date": "2026-02-05",
            "sampling_time": "08:40",
            "batch_number": "B-100201",
            "order_number": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let lims = Lims::new(&server.uri()).unwrap();
    let mut form = ArrivalForm::new();
    form.tanker_number = "TKR-00145".to_string();
    form.raw_material = "Ammonia".to_string();
    form.quantity = "18.5".to_string();
    form.supplier = "Hazira Terminal".to_string();
    form.arrival_date = "2026-02-05".to_string();
    form.arrival_time = "08:15".to_string();
    form.sampling_date = "2026-02-05".to_string();
    form.sampling_time = "08:40".to_string();
    form.batch_number = "B-100201".to_string();

    form.submit(&lims.tanker()).await.unwrap();
    assert_eq!(
        form.status().unwrap().text,
        "Tanker arrival recorded successfully!"
    );
    assert!(form.tanker_number.is_empty());
    assert!(form.quantity.is_empty());
}

fn filled_dispatch() -> DispatchForm {
    let mut form = DispatchForm::new();
    form.tanker_number = "TKR-00990".to_string();
    form.finished_product = "Urea".to_string();
    form.quantity = "22".to_string();
    form.dispatch_date = "2026-02-05".to_string();
    form.dispatch_time = "14:10".to_string();
    form.batch_number = "B-774410".to_string();
    form
}

#[tokio::test]
async fn dispatch_rejection_is_shown_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/tanker/dispatch/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "error": "Batch already dispatched"
        })))
        .mount(&server)
        .await;

    let lims = Lims::new(&server.uri()).unwrap();
    let mut form = filled_dispatch();

    assert!(form.submit(&lims.tanker()).await.is_err());
    let status = form.status().unwrap();
    assert!(!status.is_success());
    assert_eq!(status.text, "Error: Batch already dispatched");
    assert_eq!(form.tanker_number, "TKR-00990");
}

#[tokio::test]
async fn unreachable_backend_is_not_prefixed() {
    let lims = Lims::new("http://127.0.0.1:1").unwrap();
    let mut form = filled_dispatch();

    let err = form.submit(&lims.tanker()).await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(
        form.status().unwrap().text,
        "Network error. Make sure the backend is running on http://127.0.0.1:1"
    );
    assert_eq!(form.batch_number, "B-774410");
}

#[tokio::test]
async fn lab_sample_is_saved_under_the_analyst() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/labdata/save/"))
        .and(body_json(json!({
            "sample_id": "S-2026-0205-001",
            "batch_id": "B-100201",
            "order_number": "ORD-55",
            "product": "Urea",
            "moisture": 0.45,
            "purity": 98.7,
            "analyst": "a.mehta",
            "sample_date": "2026-02-05",
            "sample_time": "11:20",
            "remarks": ""
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let lims = Lims::new(&server.uri()).unwrap();
    let mut form = LabSampleForm::new("a.mehta");
    form.sample_id = "S-2026-0205-001".to_string();
    form.batch_id = "B-100201".to_string();
    form.order_number = "ORD-55".to_string();
    form.product = "Urea".to_string();
    form.moisture = "0.45".to_string();
    form.purity = "98.7".to_string();
    form.sample_date = "2026-02-05".to_string();
    form.sample_time = "11:20".to_string();

    form.submit(&lims.labdata()).await.unwrap();
    assert_eq!(form.status().unwrap().text, "Lab sample saved successfully.");
    assert_eq!(form.analyst(), "a.mehta");
    assert!(form.sample_id.is_empty());
}

#[tokio::test]
async fn invalid_lab_sample_is_not_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/labdata/save/"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let lims = Lims::new(&server.uri()).unwrap();
    let mut form = LabSampleForm::new("a.mehta");
    form.sample_id = "S-1".to_string();

    assert!(form.submit(&lims.labdata()).await.is_err());
    assert_eq!(form.status().unwrap().text, "Error: Batch ID is required");
    assert_eq!(form.sample_id, "S-1");
}
