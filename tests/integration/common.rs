use std::sync::Once;

use forcekit::{Credentials, ForceClient};

static TRACING: Once = Once::new();

/// Install a test subscriber once. Filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build a client for the org named by the `SF_*` environment variables.
///
/// Live tests MUST run against a real org, so this panics with setup
/// instructions instead of skipping when the variables are missing.
pub async fn live_client() -> ForceClient {
    init_tracing();

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => panic!(
            "\n\n\
            Live tests need Salesforce credentials ({e}).\n\
            Set either:\n\
            \x20 SF_ACCESS_TOKEN and SF_INSTANCE_URL\n\
            or all of:\n\
            \x20 SF_CLIENT_ID, SF_CLIENT_SECRET, SF_USERNAME, SF_PASSWORD\n\
            Use SF_LOGIN_URL for sandboxes (https://test.salesforce.com).\n\n"
        ),
    };

    let mut builder = ForceClient::builder().credentials(credentials);
    if let Ok(login_url) = std::env::var("SF_LOGIN_URL") {
        builder = builder.login_url(login_url);
    }

    match builder.build().await {
        Ok(client) => client,
        Err(e) => panic!("\n\nLive test authentication failed: {e}\n\n"),
    }
}

/// A name that will not collide with other test runs.
pub fn unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, chrono::Utc::now().timestamp_millis())
}
