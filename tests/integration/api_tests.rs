//! API integration tests
//!
//! These run against a live server backed by a migrated database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3000/api";

/// Helper to register a time label, returning its ID
async fn create_time(client: &Client, time_value: &str) -> i64 {
    let response = client
        .post(format!("{}/timeslots/times", BASE_URL))
        .json(&json!({ "time_value": time_value }))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No time ID")
}

/// Helper to find the link ID for a date/time pair
async fn find_slot(client: &Client, date: &str, time: &str) -> Option<i64> {
    let body: Value = client
        .get(format!("{}/timeslots", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    body["timeslots"]
        .as_array()?
        .iter()
        .find(|s| s["date"] == date && s["time"] == time)
        .and_then(|s| s["id"].as_i64())
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_batch_requires_dates_and_times() {
    let client = Client::new();

    let response = client
        .post(format!("{}/timeslots/batch", BASE_URL))
        .json(&json!({ "dates": ["2031-03-10"], "times": [] }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_batch_is_idempotent() {
    let client = Client::new();
    let batch = json!({
        "dates": ["2031-03-10"],
        "times": ["11:00〜12:00", "99:99"]
    });

    let first: Value = client
        .post(format!("{}/timeslots/batch", BASE_URL))
        .json(&batch)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(first["success"], true);
    let pairs = first["inserted"].as_i64().unwrap() + first["skipped"].as_i64().unwrap();
    assert_eq!(pairs, 2);

    let second: Value = client
        .post(format!("{}/timeslots/batch", BASE_URL))
        .json(&batch)
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(second["inserted"], 0);
    assert_eq!(second["skipped"], pairs);
}

#[tokio::test]
#[ignore]
async fn test_timeslots_sorted() {
    let client = Client::new();

    let body: Value = client
        .get(format!("{}/timeslots", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let slots = body["timeslots"].as_array().expect("No timeslots array");
    let keys: Vec<(String, String)> = slots
        .iter()
        .map(|s| {
            (
                s["date"].as_str().unwrap_or_default().to_string(),
                s["time"].as_str().unwrap_or_default().to_string(),
            )
        })
        .collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[tokio::test]
#[ignore]
async fn test_time_in_use_cannot_be_deleted() {
    let client = Client::new();
    let time_value = "07:00〜07:30";
    let time_id = create_time(&client, time_value).await;

    let response = client
        .post(format!("{}/timeslots/batch", BASE_URL))
        .json(&json!({ "dates": ["2031-04-01"], "times": [time_value] }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Linked: deletion is refused
    let response = client
        .delete(format!("{}/timeslots/times/{}", BASE_URL, time_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // Unlink, then delete
    let slot_id = find_slot(&client, "2031-04-01", time_value)
        .await
        .expect("Slot not listed");
    let response = client
        .delete(format!("{}/timeslots/{}", BASE_URL, slot_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/timeslots/times/{}", BASE_URL, time_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_time_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/timeslots/times", BASE_URL))
        .json(&json!({ "time_value": "11:00〜12:00" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_invalid_and_missing_ids() {
    let client = Client::new();

    let response = client
        .delete(format!("{}/timeslots/abc", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .delete(format!("{}/timeslots/999999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_create_order_and_summary() {
    let client = Client::new();

    let response = client
        .post(format!("{}/reservar", BASE_URL))
        .json(&json!({
            "first_name": "Hanako",
            "last_name": "Yamada",
            "email": "hanako@example.com",
            "tel": "090-0000-0000",
            "date": "2031-06-01",
            "pickupHour": "11:00〜12:00",
            "cakes": [
                { "cake_id": 1, "name": "Shortcake", "size": "15cm", "amount": 2, "price": 4200 }
            ]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["order"]["status"], "c");
    assert_eq!(body["order"]["cakes"][0]["amount"], 2);

    let body: Value = client
        .get(format!("{}/orders/summary?month=2031-06", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body["success"], true);
    let month = &body["months"][0];
    assert_eq!(month["month"], "2031-06");
    assert!(month["quantities"]["Shortcake"]["15cm"]["days"]["2031-06-01"].as_i64() >= Some(2));
}

#[tokio::test]
#[ignore]
async fn test_invalid_summary_month() {
    let client = Client::new();

    let response = client
        .get(format!("{}/orders/summary?month=june", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_list_cakes() {
    let client = Client::new();

    let response = client
        .get(format!("{}/cake", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["success"], true);
    for cake in body["cakes"].as_array().expect("No cakes array") {
        assert!(cake["id"].is_i64());
        assert!(cake["name"].is_string());
        for size in cake["sizes"].as_array().expect("No sizes array") {
            assert!(size["size"].is_string());
            assert!(size["price"].is_i64());
            assert!(size["stock"].is_i64());
        }
    }

    let response = client
        .get(format!("{}/cake/999999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_bad_json_bodies_use_error_envelope() {
    let client = Client::new();

    let requests = [
        ("timeslots/batch", json!({ "dates": ["2031-03-10"], "times": [1] })),
        ("timeslots/batch", json!({ "dates": null, "times": null })),
        ("timeslots/times", json!({ "time_value": 5 })),
        ("reservar", json!({ "first_name": "Hanako" })),
    ];

    for (path, payload) in requests {
        let response = client
            .post(format!("{}/{}", BASE_URL, path))
            .json(&payload)
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 400, "{}", path);

        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    let response = client
        .put(format!("{}/orders/1/status", BASE_URL))
        .json(&json!({ "status": "z" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
}
