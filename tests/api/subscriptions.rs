use sea_orm::EntityTrait;
use serde_json::{Value, json};
use subscription_aggregator::entities::subscriptions;

use crate::helpers::spawn_app;

fn netflix() -> Value {
    json!({
        "service_name": "Netflix",
        "price": 500,
        "user_id": "11111111-1111-1111-1111-111111111111",
        "start_date": "2024-01"
    })
}

#[tokio::test]
async fn create_returns_a_200_with_a_generated_id() {
    let test_app = spawn_app().await;

    let response = test_app.create_subscription(&netflix()).await;

    assert_eq!(200, response.status().as_u16());
    let created: Value = response.json().await.unwrap();
    assert!(uuid::Uuid::parse_str(created["id"].as_str().unwrap()).is_ok());
    assert_eq!(created["service_name"], "Netflix");
    assert_eq!(created["price"], 500);
    assert_eq!(created["user_id"], "11111111-1111-1111-1111-111111111111");
    assert_eq!(created["start_date"], "2024-01");
    assert_eq!(created["end_date"], Value::Null);

    let saved = subscriptions::Entity::find()
        .all(&test_app.db)
        .await
        .expect("Failed to fetch saved subscription.");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].service_name, "Netflix");
    assert_eq!(saved[0].price, 500);
}

#[tokio::test]
async fn netflix_lifecycle_create_get_delete_get() {
    let test_app = spawn_app().await;
    let id = test_app.seed(&netflix()).await;

    let response = test_app.get_subscription(&id).await;
    assert_eq!(200, response.status().as_u16());
    let fetched: Value = response.json().await.unwrap();
    assert_eq!(fetched["id"], id.as_str());
    assert_eq!(fetched["service_name"], "Netflix");
    assert_eq!(fetched["price"], 500);
    assert_eq!(fetched["start_date"], "2024-01");

    let response = test_app.delete_subscription(&id).await;
    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Subscription deleted");

    let response = test_app.get_subscription(&id).await;
    assert_eq!(404, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Subscription not found");
}

#[tokio::test]
async fn create_returns_a_400_for_invalid_fields_and_stores_nothing() {
    let test_app = spawn_app().await;
    let test_cases = vec![
        (json!({"service_name": "", "price": 500, "user_id": "11111111-1111-1111-1111-111111111111", "start_date": "2024-01"}), "empty service_name"),
        (json!({"service_name": "Netflix", "price": 0, "user_id": "11111111-1111-1111-1111-111111111111", "start_date": "2024-01"}), "zero price"),
        (json!({"service_name": "Netflix", "price": -1, "user_id": "11111111-1111-1111-1111-111111111111", "start_date": "2024-01"}), "negative price"),
        (json!({"service_name": "Netflix", "price": 500, "user_id": "not-a-uuid", "start_date": "2024-01"}), "malformed user_id"),
        (json!({"service_name": "Netflix", "price": 500, "user_id": "11111111-1111-1111-1111-111111111111", "start_date": "2024-02", "end_date": "2024-01"}), "end before start"),
        (json!({"price": 500}), "missing fields"),
    ];

    for (body, desc) in test_cases {
        let response = test_app.create_subscription(&body).await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "当 payload 为 {} 时, API 没有返回 400",
            desc
        );
    }

    let saved = subscriptions::Entity::find().all(&test_app.db).await.unwrap();
    assert!(saved.is_empty());
}

#[tokio::test]
async fn create_returns_a_400_for_malformed_json() {
    let test_app = spawn_app().await;

    let response = test_app
        .api_client
        .post(format!("{}/api/subscriptions", test_app.address))
        .header("Content-Type", "application/json")
        .body("{\"service_name\": ")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid JSON input");
}

#[tokio::test]
async fn list_returns_every_subscription() {
    let test_app = spawn_app().await;

    let response = test_app.list_subscriptions().await;
    assert_eq!(200, response.status().as_u16());
    let listed: Vec<Value> = response.json().await.unwrap();
    assert!(listed.is_empty());

    test_app.seed(&netflix()).await;
    let mut spotify = netflix();
    spotify["service_name"] = json!("Spotify");
    spotify["end_date"] = json!("2024-12");
    test_app.seed(&spotify).await;

    let listed: Vec<Value> = test_app.list_subscriptions().await.json().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().any(|s| s["end_date"] == "2024-12"));
}

#[tokio::test]
async fn update_replaces_the_record() {
    let test_app = spawn_app().await;
    let id = test_app.seed(&netflix()).await;

    let replacement = json!({
        "service_name": "Netflix Premium",
        "price": 999,
        "user_id": "22222222-2222-2222-2222-222222222222",
        "start_date": "2024-02",
        "end_date": "2025-02"
    });
    let response = test_app.update_subscription(&id, &replacement).await;
    assert_eq!(200, response.status().as_u16());
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["price"], 999);

    let fetched: Value = test_app.get_subscription(&id).await.json().await.unwrap();
    assert_eq!(fetched["service_name"], "Netflix Premium");
    assert_eq!(fetched["price"], 999);
    assert_eq!(fetched["user_id"], "22222222-2222-2222-2222-222222222222");
    assert_eq!(fetched["start_date"], "2024-02");
    assert_eq!(fetched["end_date"], "2025-02");
}

#[tokio::test]
async fn update_of_unknown_id_returns_a_404_and_changes_nothing() {
    let test_app = spawn_app().await;
    let id = test_app.seed(&netflix()).await;

    let mut replacement = netflix();
    replacement["price"] = json!(1);
    let response = test_app
        .update_subscription(&uuid::Uuid::new_v4().to_string(), &replacement)
        .await;
    assert_eq!(404, response.status().as_u16());

    let fetched: Value = test_app.get_subscription(&id).await.json().await.unwrap();
    assert_eq!(fetched["price"], 500);
}

#[tokio::test]
async fn update_with_invalid_payload_returns_a_400() {
    let test_app = spawn_app().await;
    let id = test_app.seed(&netflix()).await;

    let mut replacement = netflix();
    replacement["price"] = json!(-5);
    let response = test_app.update_subscription(&id, &replacement).await;

    assert_eq!(400, response.status().as_u16());
    let fetched: Value = test_app.get_subscription(&id).await.json().await.unwrap();
    assert_eq!(fetched["price"], 500);
}

#[tokio::test]
async fn delete_of_unknown_id_returns_a_404() {
    let test_app = spawn_app().await;

    let response = test_app
        .delete_subscription(&uuid::Uuid::new_v4().to_string())
        .await;

    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn malformed_ids_return_a_400() {
    let test_app = spawn_app().await;
    test_app.seed(&netflix()).await;

    let get = test_app.get_subscription("not-a-uuid").await;
    let put = test_app.update_subscription("not-a-uuid", &netflix()).await;
    let delete = test_app.delete_subscription("not-a-uuid").await;

    for (response, method) in [(get, "GET"), (put, "PUT"), (delete, "DELETE")] {
        assert_eq!(400, response.status().as_u16(), "{} did not return 400", method);
    }
    let saved = subscriptions::Entity::find().all(&test_app.db).await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].price, 500);
}
