//! Live org tests. Run with `--ignored`.

use super::common::{live_client, unique_name};
use forcekit::rest::Decoded;
use forcekit::{sobject_record, QuerySpec};
use serde_json::json;

#[derive(Debug, Default)]
struct Account {
    id: String,
    name: String,
}

sobject_record!(Account {
    id => "Id",
    name => "Name",
});

#[tokio::test]
#[ignore = "needs a Salesforce org"]
async fn test_live_describe_account() {
    let client = live_client().await;

    let metadata = client
        .describe("Account")
        .await
        .expect("describe should succeed");

    assert_eq!(metadata.name, "Account");
    assert!(metadata.field("Id").is_some());
    assert!(metadata.field("Name").is_some());
}

#[tokio::test]
#[ignore = "needs a Salesforce org"]
async fn test_live_describe_unknown_object() {
    let client = live_client().await;

    let err = client
        .describe("Forcekit_Does_Not_Exist__c")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore = "needs a Salesforce org"]
async fn test_live_crud_and_query() {
    let client = live_client().await;
    let name = unique_name("forcekit live");

    let created = client
        .create("Account", &json!({"Name": name}))
        .await
        .expect("create should succeed");
    assert!(created.success);

    let renamed = format!("{} renamed", name);
    client
        .update("Account", &created.id, &json!({"Name": renamed}))
        .await
        .expect("update should succeed");

    let spec = QuerySpec::new(format!(
        "SELECT Id, Name FROM Account WHERE Id = '{}'",
        created.id
    ));
    let (_, decoded) = client
        .query_and_decode::<Account>(&spec)
        .await
        .expect("query should succeed");

    match decoded {
        Decoded::One(account) => assert_eq!(account.name, renamed),
        other => panic!("expected exactly one record, got {other:?}"),
    }

    client
        .destroy("Account", &created.id)
        .await
        .expect("destroy should succeed");
}

#[tokio::test]
#[ignore = "needs a Salesforce org"]
async fn test_live_projection_query() {
    let client = live_client().await;

    let spec = client
        .build_projection_query("User")
        .await
        .expect("projection should build");
    assert!(spec.as_str().starts_with("select Id,"));
    assert!(spec.as_str().ends_with(" from User "));

    let page = client
        .query(&QuerySpec::new(format!("{}LIMIT 1", spec)))
        .await
        .expect("projection query should run");
    assert!(page.records.len() <= 1);
}
