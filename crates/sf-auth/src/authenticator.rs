//! Turning credentials into a [`Session`].

use forcekit_client::{ApiVersion, ClientConfig, Session};
use tracing::{debug, instrument};

use crate::credentials::Credentials;
use crate::error::{Error, Result};
use crate::oauth::OAuthClient;

/// Establish a session.
///
/// A bearer token is trusted as-is and costs no network call. The password
/// grant makes exactly one request to `<login_url>/services/oauth2/token`.
/// Credentials are checked before anything is sent.
#[instrument(skip(credentials, config), fields(login_url = %login_url, api_version = %api_version))]
pub async fn authenticate(
    credentials: &Credentials,
    login_url: &str,
    api_version: ApiVersion,
    config: &ClientConfig,
) -> Result<Session> {
    credentials.validate()?;

    match credentials {
        Credentials::BearerToken {
            token,
            instance_url,
        } => Ok(Session::new(instance_url.as_str(), token.as_str(), api_version)?),
        Credentials::PasswordGrant(password) => {
            let oauth = OAuthClient::with_config(login_url, config.clone())?;
            let token = oauth.password_grant(password).await?;

            let (Some(instance_url), Some(access_token)) =
                (token.instance_url(), token.access_token())
            else {
                return Err(Error::protocol(
                    "token response is missing instance_url or access_token",
                ));
            };

            let session = Session::new(instance_url, access_token, api_version)?;
            debug!(instance_url = %session.instance_url(), "Authenticated");
            Ok(session)
        }
    }
}
