mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use common::{assert_not_found, TestApp};

const CREATE: &str = "/api/helprequest/post?requesterEmail=cgaucho%40ucsb.edu&teamId=s22-5pm-3\
    &tableOrBreakoutRoom=7&explanation=Need%20help%20with%20Swagger-ui&solved=false\
    &requestTime=2022-04-20T17:35:00";

#[tokio::test]
async fn users_open_help_requests() -> Result<()> {
    let app = TestApp::new();
    let user = app.user_token();

    let res = app.post(CREATE, Some(&user)).await;
    assert_eq!(res.status, StatusCode::OK, "body: {}", res.body);
    let id = res.body["id"].as_i64().expect("id");
    assert_eq!(
        res.body,
        json!({
            "id": id,
            "requesterEmail": "cgaucho@ucsb.edu",
            "teamId": "s22-5pm-3",
            "tableOrBreakoutRoom": "7",
            "explanation": "Need help with Swagger-ui",
            "solved": false,
            "requestTime": "2022-04-20T17:35:00"
        })
    );

    let res = app.get("/api/helprequest/all", Some(&user)).await;
    assert_eq!(res.body.as_array().map(Vec::len), Some(1));

    let res = app.get("/api/helprequest/all", None).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn only_admins_resolve_help_requests() -> Result<()> {
    let app = TestApp::new();
    let user = app.user_token();
    let admin = app.admin_token();

    let created = app.post(CREATE, Some(&user)).await.body;
    let id = created["id"].as_i64().expect("id");
    let mut solved = created.clone();
    solved["solved"] = json!(true);

    let res = app.put(&format!("/api/helprequest?id={}", id), Some(&user), solved.clone()).await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app.put(&format!("/api/helprequest?id={}", id), Some(&admin), solved.clone()).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["solved"], true);

    let res = app.delete(&format!("/api/helprequest?id={}", id), Some(&admin)).await;
    assert_eq!(res.body, json!({"message": format!("HelpRequest with id {} deleted", id)}));

    let res = app.get(&format!("/api/helprequest?id={}", id), Some(&user)).await;
    assert_not_found(&res, &format!("HelpRequest with id {} not found", id));
    Ok(())
}
