use axum::Router;
use axum::http::StatusCode;
use axum_test::TestServer;

use medicart_shop::handlers::directory::directory_router;

fn server() -> TestServer {
    let app: Router = directory_router();
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn should_list_divisions() {
    let response = server().get("/users/divisions").await;

    response.assert_status_ok();
    let divisions: Vec<String> = response.json();
    assert_eq!(divisions.len(), 8);
    assert!(divisions.iter().any(|d| d == "Dhaka"));
}

#[tokio::test]
async fn should_list_districts_and_cities() {
    let server = server();

    let districts: Vec<String> = server.get("/users/districts/Dhaka").await.json();
    assert!(districts.iter().any(|d| d == "Gazipur"));

    let cities: Vec<String> = server.get("/users/cities/Dhaka/Dhaka").await.json();
    assert!(cities.iter().any(|c| c == "Savar"));
}

#[tokio::test]
async fn should_return_empty_lists_for_unknown_keys() {
    let server = server();

    let districts = server.get("/users/districts/Atlantis").await;
    districts.assert_status(StatusCode::OK);
    assert!(districts.json::<Vec<String>>().is_empty());

    let cities: Vec<String> = server.get("/users/cities/Dhaka/Atlantis").await.json();
    assert!(cities.is_empty());
}

#[tokio::test]
async fn should_decode_percent_encoded_names() {
    let cities: Vec<String> = server()
        .get("/users/cities/Chattogram/Cox's%20Bazar")
        .await
        .json();

    assert!(!cities.is_empty());
}
