//! Back-office flows: authentication, dashboard and data management

mod common;

use common::{ADMIN_PASSWORD, MultipartBody, TINY_PNG, TestApp, words};
use http::{Method, Request, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_failed_logins_are_indistinguishable() {
    let app = TestApp::new().await;

    let mut bodies = Vec::new();
    for (username, password) in [
        ("admin", "wrong-1"),
        ("admin", "wrong-2"),
        ("nobody", "wrong-3"),
    ] {
        let (status, body) = app.login_as(username, password).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        bodies.push(body);
    }
    assert_eq!(bodies[0]["code"], 1002);
    assert!(bodies.iter().all(|b| *b == bodies[0]));

    let (status, body) = app.login_as("admin", ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["username"], "admin");
}

#[tokio::test]
async fn test_missing_token_is_401_and_bad_token_is_403() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/orders", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, body) = app.get("/api/orders", Some("not-a-token")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 1004);

    let (status, _) = app
        .post("/api/menu", None, json!({ "name": "Idli", "price": 2, "category": "Tiffin" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = app.admin_token().await;
    let (status, me) = app.get("/api/admin/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "admin");
}

#[tokio::test]
async fn test_change_password() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let (status, body) = app
        .post(
            "/api/admin/change-password",
            Some(&token),
            json!({ "currentPassword": "nope", "newPassword": "fresh-secret" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["details"]["field"], "currentPassword");

    let (status, body) = app
        .post(
            "/api/admin/change-password",
            Some(&token),
            json!({ "currentPassword": ADMIN_PASSWORD, "newPassword": "abc" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1005);

    let (status, _) = app
        .post(
            "/api/admin/change-password",
            Some(&token),
            json!({ "currentPassword": ADMIN_PASSWORD, "newPassword": "fresh-secret" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.login_as("admin", ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.login_as("admin", "fresh-secret").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_stats_on_empty_store() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let (status, stats) = app.get("/api/admin/stats", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["orderCount"], 0);
    assert_eq!(stats["revenue"], 0.0);
    assert_eq!(stats["averageRating"], 0.0);
    assert_eq!(stats["ordersByStatus"]["pending"], 0);
    assert_eq!(stats["reservationsByStatus"]["confirmed"], 0);

    let (_, again) = app.get("/api/admin/stats", Some(&token)).await;
    assert_eq!(stats, again);
}

#[tokio::test]
async fn test_stats_exclude_cancelled_revenue() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let mut ids = Vec::new();
    for price in [10.25, 4.5] {
        let (_, order) = app
            .post(
                "/api/orders",
                None,
                json!({
                    "customerName": "Asha",
                    "customerPhone": "555-0101",
                    "customerAddress": "12 Market St",
                    "items": [{ "name": "Thali", "price": price, "quantity": 2 }]
                }),
            )
            .await;
        ids.push(order["id"].as_i64().unwrap());
    }
    let (status, _) = app
        .put(&format!("/api/orders/{}", ids[1]), &token, json!({ "status": "cancelled" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    for rating in [5, 2] {
        app.post(
            "/api/reviews",
            None,
            json!({ "customerName": "Ravi", "rating": rating, "reviewText": words(10) }),
        )
        .await;
    }

    let (_, stats) = app.get("/api/admin/stats", Some(&token)).await;
    assert_eq!(stats["orderCount"], 2);
    assert_eq!(stats["revenue"], 20.5);
    assert_eq!(stats["reviewCount"], 2);
    assert_eq!(stats["averageRating"], 3.5);
    assert_eq!(stats["ordersByStatus"]["cancelled"], 1);
    assert_eq!(stats["pendingReviews"], 2);

    let (_, past) = app
        .get("/api/admin/stats?startDate=2001-01-01&endDate=2001-01-31", Some(&token))
        .await;
    assert_eq!(past["orderCount"], 0);
    assert_eq!(past["averageRating"], 0.0);
    assert_eq!(past["ordersByStatus"]["cancelled"], 1);

    let (status, err) = app
        .get("/api/admin/stats?startDate=2001-01-01", Some(&token))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 2);
}

#[tokio::test]
async fn test_upload_stores_and_serves_image() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let body = MultipartBody::default()
        .file("image", "dot.png", "image/png", TINY_PNG)
        .finish();
    let (status, stored) = app.multipart("/api/upload", Some(&token), body).await;
    assert_eq!(status, StatusCode::OK, "{stored}");
    assert_eq!(stored["storage"], "local");
    let url = stored["url"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method(Method::GET)
        .uri(&url)
        .body(axum::body::Body::empty())
        .unwrap();
    let (status, bytes) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, TINY_PNG);

    let body = MultipartBody::default().text("caption", "no file").finish();
    let (status, err) = app.multipart("/api/upload", Some(&token), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 8004);

    let body = MultipartBody::default()
        .file("image", "notes.png", "image/png", b"definitely not an image")
        .finish();
    let (status, err) = app.multipart("/api/upload", Some(&token), body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["code"], 8002);
}

#[tokio::test]
async fn test_backup_raw_data_and_clear_all() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    app.post(
        "/api/menu",
        Some(&token),
        json!({ "name": "Idli", "price": 2, "category": "Tiffin" }),
    )
    .await;
    app.post(
        "/api/reviews",
        None,
        json!({ "customerName": "Ravi", "rating": 5, "reviewText": words(10) }),
    )
    .await;

    let (status, raw) = app.get("/api/admin/raw-data", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(raw["counts"]["menuItems"], 1);
    assert_eq!(raw["counts"]["reviews"], 1);
    assert!(raw["adminUsers"][0].get("passwordHash").is_none());

    let (status, backup) = app.post("/api/admin/backup", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::OK, "{backup}");
    let file_name = backup["fileName"].as_str().unwrap().to_string();
    let written = std::fs::read_to_string(app.dir.path().join("backups").join(&file_name)).unwrap();
    let snapshot: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(snapshot["menuItems"][0]["name"], "Idli");

    let (_, info) = app.get("/api/admin/data-info", Some(&token)).await;
    assert_eq!(info["backups"][0]["fileName"], file_name.as_str());
    assert_eq!(info["counts"]["adminUsers"], 1);

    let (status, cleared) = app.post("/api/admin/clear-all", Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["deleted"]["menuItems"], 1);
    assert_eq!(cleared["deleted"]["reviews"], 1);

    let (_, info) = app.get("/api/admin/data-info", Some(&token)).await;
    assert_eq!(info["counts"]["menuItems"], 0);
    assert_eq!(info["counts"]["adminUsers"], 1);

    // The admin account survives
    let (status, _) = app.login_as("admin", ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_table_numbers_are_unique() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let table = json!({ "tableNumber": 1, "capacity": 4 });
    let (status, _) = app.post("/api/tables", Some(&token), table.clone()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, err) = app.post("/api/tables", Some(&token), table).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(err["code"], 4);

    let (status, err) = app
        .post("/api/tables", Some(&token), json!({ "tableNumber": 2, "capacity": 21 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["details"]["field"], "capacity");

    let (_, tables) = app.get("/api/tables", Some(&token)).await;
    assert_eq!(tables.as_array().unwrap().len(), 1);
    assert_eq!(tables[0]["available"], true);
}

#[tokio::test]
async fn test_menu_update_can_remove_image() {
    let app = TestApp::new().await;
    let token = app.admin_token().await;

    let dosa = json!({
        "name": "Dosa",
        "price": 3,
        "category": "Tiffin",
        "imageUrl": "/uploads/a.png",
    });
    let (status, item) = app.post("/api/menu", Some(&token), dosa).await;
    assert_eq!(status, StatusCode::OK);
    let uri = format!("/api/menu/{}", item["id"]);

    let (status, kept) = app.put(&uri, &token, json!({ "price": 4 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kept["imageUrl"], "/uploads/a.png");

    let (status, cleared) = app.put(&uri, &token, json!({ "imageUrl": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared["imageUrl"].is_null());
    assert_eq!(cleared["price"], 4.0);

    app.put(&uri, &token, json!({ "imageUrl": "/uploads/b.png" })).await;
    let (status, blanked) = app.put(&uri, &token, json!({ "imageUrl": "  " })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(blanked["imageUrl"].is_null());
}
