//! End-to-end flows against a mock org.

use super::common::init_tracing;
use forcekit::rest::{Decoded, ErrorKind};
use forcekit::{sobject_record, ForceClient, PasswordCredentials, QuerySpec};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Default, PartialEq)]
struct Account {
    id: String,
    name: String,
    annual_revenue: Option<serde_json::Number>,
}

sobject_record!(Account {
    id => "Id",
    name => "Name",
    annual_revenue => "AnnualRevenue",
});

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .and(body_string_contains("grant_type=password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "00Dxx!mock-session",
            "instance_url": server.uri(),
            "id": format!("{}/id/00Dxx0000000001/005xx0000000001", server.uri()),
            "token_type": "Bearer",
            "issued_at": "1700000000000",
            "signature": "c2lnbmF0dXJl"
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_describe(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/services/data/v62.0/sobjects/Account/describe"))
        .and(header("Authorization", "Bearer 00Dxx!mock-session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Account",
            "fields": [
                {"name": "Id", "type": "id"},
                {"name": "Name", "type": "string"},
                {"name": "AnnualRevenue", "type": "currency"}
            ]
        })))
        .mount(server)
        .await;
}

async fn password_client(server: &MockServer) -> ForceClient {
    ForceClient::builder()
        .login_url(server.uri())
        .password_credentials(PasswordCredentials::new(
            "cid",
            "csecret",
            "user@example.com",
            "hunter2",
        ))
        .build()
        .await
        .expect("build should succeed")
}

#[tokio::test]
async fn test_password_login_describe_query_decode() {
    init_tracing();
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_describe(&server).await;

    Mock::given(method("GET"))
        .and(path("/services/data/v62.0/query"))
        .and(query_param("q", "select Id,Name,AnnualRevenue from Account "))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalSize": 2,
            "done": true,
            "records": [
                {"attributes": {"type": "Account"}, "Id": "001A", "Name": "Acme", "AnnualRevenue": 1000.5},
                {"attributes": {"type": "Account"}, "Id": "001B", "Name": "Globex", "AnnualRevenue": null}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = password_client(&server).await;
    assert_eq!(client.instance_url(), server.uri());

    let spec = client.build_projection_query("Account").await.unwrap();
    assert_eq!(spec.as_str(), "select Id,Name,AnnualRevenue from Account ");

    let (page, decoded) = client.query_and_decode::<Account>(&spec).await.unwrap();
    assert!(page.done);

    let Decoded::Many(accounts) = decoded else {
        panic!("two records should decode as Many");
    };
    assert_eq!(accounts[0].name, "Acme");
    assert_eq!(
        accounts[0].annual_revenue.as_ref().and_then(|n| n.as_f64()),
        Some(1000.5)
    );
    assert_eq!(accounts[1].id, "001B");
    assert_eq!(accounts[1].annual_revenue, None);
}

#[tokio::test]
async fn test_create_update_destroy_round() {
    init_tracing();
    let server = MockServer::start().await;
    mount_token(&server).await;

    Mock::given(method("POST"))
        .and(path("/services/data/v62.0/sobjects/Account"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "001xx000003DGb2AAG",
            "success": true,
            "errors": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/services/data/v62.0/sobjects/Account/001xx000003DGb2AAG"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/services/data/v62.0/sobjects/Account/001xx000003DGb2AAG"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = password_client(&server).await;

    let created = client
        .create("Account", &json!({"Name": "Acme"}))
        .await
        .unwrap();
    assert!(created.success);

    client
        .update("Account", &created.id, &json!({"Name": "Acme Corp"}))
        .await
        .unwrap();
    client.destroy("Account", &created.id).await.unwrap();
}

#[tokio::test]
async fn test_clients_share_nothing_mutable_across_tasks() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    mount_describe(&server).await;

    let client = password_client(&server).await;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.describe("Account").await })
        })
        .collect();

    for handle in handles {
        let metadata = handle.await.unwrap().unwrap();
        assert_eq!(metadata.field_names_string(), "Id,Name,AnnualRevenue");
    }
}

#[tokio::test]
async fn test_expired_session_surfaces_remote_error() {
    let server = MockServer::start().await;
    let body = r#"[{"message":"Session expired or invalid","errorCode":"INVALID_SESSION_ID"}]"#;

    Mock::given(method("GET"))
        .and(path("/services/data/v62.0/query"))
        .respond_with(ResponseTemplate::new(401).set_body_string(body))
        .mount(&server)
        .await;

    let client = ForceClient::builder()
        .instance_url(server.uri())
        .access_token("00Dxx!expired")
        .build()
        .await
        .unwrap();

    let err = client
        .query(&QuerySpec::new("SELECT Id FROM Account"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(matches!(err.kind, ErrorKind::Remote { body: ref b, .. } if b == body));
    assert_eq!(err.api_errors()[0].error_code, "INVALID_SESSION_ID");
}

#[tokio::test]
async fn test_unreachable_instance_is_transport_error() {
    let client = ForceClient::builder()
        .instance_url("http://127.0.0.1:9")
        .access_token("00Dxx!tok")
        .build()
        .await
        .unwrap();

    let err = client.describe("Account").await.unwrap_err();
    assert!(err.is_transport());
}
