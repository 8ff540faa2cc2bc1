mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn customers_are_registered_and_found_by_email() {
    let app = TestApp::spawn().await;
    let id = app.add_customer("Ada", "Lovelace", "ada@example.org").await;

    let found = app
        .get("/rest/customer/api/searchByEmail?email=ada@example.org")
        .await;
    assert_eq!(found.status, StatusCode::OK);
    let body = found.body.unwrap();
    assert_eq!(body["id"], id);
    assert_eq!(body["firstName"], "Ada");

    let missing = app
        .get("/rest/customer/api/searchByEmail?email=nobody@example.org")
        .await;
    assert_eq!(missing.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn email_must_stay_unique() {
    let app = TestApp::spawn().await;
    let ada = app.add_customer("Ada", "Lovelace", "ada@example.org").await;
    app.add_customer("Alan", "Turing", "alan@example.org").await;

    let duplicate = app
        .post(
            "/rest/customer/api/addCustomer",
            json!({ "firstName": "Ada", "lastName": "King", "email": "ada@example.org" }),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let stolen = app
        .put(
            "/rest/customer/api/updateCustomer",
            json!({ "id": ada, "firstName": "Ada", "lastName": "King", "email": "alan@example.org" }),
        )
        .await;
    assert_eq!(stolen.status, StatusCode::CONFLICT);

    let renamed = app
        .put(
            "/rest/customer/api/updateCustomer",
            json!({ "id": ada, "firstName": "Ada", "lastName": "King", "email": "ada@example.org" }),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.body.unwrap()["lastName"], "King");

    let unknown = app
        .put(
            "/rest/customer/api/updateCustomer",
            json!({ "id": 77, "firstName": "No", "lastName": "One", "email": "no@example.org" }),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}
