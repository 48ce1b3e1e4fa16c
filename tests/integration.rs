use actix_web::{http::StatusCode, test, web, App};
use serde_json::{json, Value};

use keepsake::api::{create_review, delete_photo, photos, reviews, upload};
use keepsake::app_state::AppState;

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::new_for_testing()))
                .service(upload)
                .service(photos)
                .service(delete_photo)
                .service(reviews)
                .service(create_review),
        )
        .await
    };
}

#[actix_web::test]
async fn test_upload_list_delete_flow() {
    let app = test_app!();

    // Upload
    let req = test::TestRequest::post()
        .uri("/upload/our%20anniversary.png")
        .set_payload(vec![0x89u8, b'P', b'N', b'G'])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));
    let filename = body["filename"].as_str().unwrap().to_string();
    assert!(filename.ends_with(".png"));
    assert_eq!(body["url"], json!(format!("/uploads/{}", filename)));

    // List
    let req = test::TestRequest::get().uri("/photos").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listing: Value = test::read_body_json(resp).await;
    let entries = listing.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["filename"], json!(filename));
    assert_eq!(entries[0]["size"], json!(4));
    assert!(entries[0]["upload_time"].as_str().unwrap().contains(", 2"));

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/photos/{}", filename))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/photos").to_request();
    let resp = test::call_service(&app, req).await;
    let listing: Value = test::read_body_json(resp).await;
    assert!(listing.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_upload_rejects_disallowed_extension() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/upload/malware.exe")
        .set_payload(b"MZ".to_vec())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["message"].as_str().unwrap().contains("Invalid file type"));
}

#[actix_web::test]
async fn test_delete_unknown_photo_is_not_found() {
    let app = test_app!();

    let req = test::TestRequest::delete()
        .uri("/photos/deadbeefdeadbeefdeadbeefdeadbeef.png")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
}

#[actix_web::test]
async fn test_review_insert_and_listing_order() {
    let app = test_app!();

    for (name, rating) in [("Noodle Bar", 4), ("Le Petit Jardin", 5)] {
        let req = test::TestRequest::post()
            .uri("/reviews")
            .set_json(json!({
                "name": name,
                "date": "2024-08-30",
                "cuisine": "mixed",
                "rating": rating,
                "favorite_dish": "the bread, somehow",
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["review"]["name"], json!(name));
        assert!(!body["review"]["id"].as_str().unwrap().is_empty());
    }

    let req = test::TestRequest::get().uri("/reviews").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listing: Value = test::read_body_json(resp).await;
    let entries = listing.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], json!("Le Petit Jardin"));
    assert_eq!(entries[1]["name"], json!("Noodle Bar"));
}

#[actix_web::test]
async fn test_review_validation_reports_missing_field() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/reviews")
        .set_json(json!({"date": "2024-01-01", "rating": 5}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert!(body["message"].as_str().unwrap().contains("name"));

    // Failed insert leaves the collection unchanged.
    let req = test::TestRequest::get().uri("/reviews").to_request();
    let resp = test::call_service(&app, req).await;
    let listing: Value = test::read_body_json(resp).await;
    assert!(listing.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_review_accepts_string_rating() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/reviews")
        .set_json(json!({"name": "Taqueria", "date": "2024-07-04", "rating": "5"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["review"]["rating"], json!(5));
}
