mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{assert_not_found, TestApp};

const CREATE: &str = "/api/recommendationRequest/post?requesterEmail=cgaucho%40ucsb.edu\
    &professorEmail=phtcon%40ucsb.edu&explanation=BS%2FMS%20program\
    &dateRequested=2022-04-20T00:00:00&dateNeeded=2022-05-01T00:00:00&done=false";

#[tokio::test]
async fn users_submit_and_read_requests() -> Result<()> {
    let app = TestApp::new();
    let user = app.user_token();

    let res = app.post(CREATE, Some(&user)).await;
    assert_eq!(res.status, StatusCode::OK, "body: {}", res.body);
    let id = res.body["id"].as_i64().expect("id");
    assert_eq!(res.body["requesterEmail"], "cgaucho@ucsb.edu");
    assert_eq!(res.body["explanation"], "BS/MS program");
    assert_eq!(res.body["dateNeeded"], "2022-05-01T00:00:00");
    assert_eq!(res.body["done"], false);

    let res = app.get(&format!("/api/recommendationRequest?id={}", id), Some(&user)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["professorEmail"], "phtcon@ucsb.edu");

    // only admins see the full list
    let res = app.get("/api/recommendationRequest/all", Some(&user)).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    let res = app.get("/api/recommendationRequest/all", Some(&app.admin_token())).await;
    assert_eq!(res.body.as_array().map(Vec::len), Some(1));

    // paths are case-sensitive
    let res = app.get("/api/recommendationrequest/all", Some(&app.admin_token())).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn admins_close_and_remove_requests() -> Result<()> {
    let app = TestApp::new();
    let user = app.user_token();
    let admin = app.admin_token();

    let created = app.post(CREATE, Some(&user)).await.body;
    let id = created["id"].as_i64().expect("id");
    let mut closed = created.clone();
    closed["done"] = json!(true);

    let res = app
        .put(&format!("/api/recommendationRequest?id={}", id), Some(&user), closed.clone())
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app
        .put(&format!("/api/recommendationRequest?id={}", id), Some(&admin), closed.clone())
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, closed);

    let res = app.delete(&format!("/api/recommendationRequest?id={}", id), Some(&user)).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app.delete(&format!("/api/recommendationRequest?id={}", id), Some(&admin)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body["message"],
        format!("UCSBRecommendationRequest with id {} deleted", id)
    );

    let res = app.delete(&format!("/api/recommendationRequest?id={}", id), Some(&admin)).await;
    assert_not_found(&res, &format!("UCSBRecommendationRequest with id {} not found", id));
    Ok(())
}
