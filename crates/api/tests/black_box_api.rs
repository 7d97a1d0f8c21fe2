use reqwest::StatusCode;
use serde_json::json;

use goodbank_core::OrganizationId;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = goodbank_api::app::build_app().await;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn health_endpoint_responds() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn item_lifecycle_over_http() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let org = OrganizationId::new();
    let items_url = format!("{}/organizations/{}/items", srv.base_url, org);

    // Catalog entry first, so the item picks up a reporting category.
    let res = client
        .post(format!("{}/base_items", srv.base_url))
        .json(&json!({
            "name": "Kids Size 4",
            "category": "Diapers - Childrens",
            "partner_key": "Diapers",
            "size": "4",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let base: serde_json::Value = res.json().await.unwrap();
    assert_eq!(base["classification"]["disposable"], json!(true));
    let base_item_id = base["id"].as_str().unwrap().to_string();

    let res = client
        .post(&items_url)
        .json(&json!({
            "name": "Size 4 Diapers",
            "base_item_id": base_item_id,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let item: serde_json::Value = res.json().await.unwrap();
    let item_id = item["id"].as_str().unwrap().to_string();
    assert_eq!(item["reporting_category"], json!("diapers"));
    assert_eq!(item["default_quantity"], json!(50));

    // Deactivate, then check the listing scopes both ways.
    let res = client
        .post(format!("{}/{}/deactivate", items_url, item_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}?scope=active", items_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());

    let res = client
        .post(format!("{}/reactivate", items_url))
        .json(&json!({ "item_ids": [item_id] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let report: serde_json::Value = res.json().await.unwrap();
    assert_eq!(report["reactivated_count"], json!(1));

    // Gone for good once destroyed.
    let res = client
        .delete(format!("{}/{}", items_url, item_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/{}", items_url, item_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn kit_membership_blocks_deactivation_with_fixed_reason() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let org = OrganizationId::new();
    let items_url = format!("{}/organizations/{}/items", srv.base_url, org);
    let kits_url = format!("{}/organizations/{}/kits", srv.base_url, org);

    let res = client
        .post(&items_url)
        .json(&json!({ "name": "Size 1 Diapers" }))
        .send()
        .await
        .unwrap();
    let component: serde_json::Value = res.json().await.unwrap();
    let component_id = component["id"].as_str().unwrap().to_string();

    let res = client
        .post(&kits_url)
        .json(&json!({
            "name": "Newborn Kit",
            "line_items": [{ "item_id": component_id, "quantity": 24 }],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["item"]["kit_id"], created["kit"]["id"]);
    assert_eq!(created["item"]["reporting_category"], json!(null));
    let backing_id = created["item"]["id"].as_str().unwrap().to_string();

    let res = client
        .post(format!("{}/{}/deactivate", items_url, component_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body["message"],
        json!("Cannot deactivate item - it is in a storage location or kit!")
    );

    let res = client
        .delete(format!("{}/{}", items_url, backing_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body["message"],
        json!("Cannot delete item - it has already been used!")
    );
}
