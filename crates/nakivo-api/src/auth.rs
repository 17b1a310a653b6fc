// Director authentication
//
// Cookie-based session login/logout. A successful `login` sets the session
// cookie in the HTTP client's jar; subsequent calls carry it automatically.

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::debug;

use crate::client::{Client, Reply};
use crate::context::CallContext;
use crate::envelope::RequestEnvelope;
use crate::error::Error;
use crate::models::LoginInfo;

/// Router action handling sessions.
pub const AUTHENTICATION_ACTION: &str = "AuthenticationManagement";

/// `AuthenticationManagement` calls, borrowed from a [`Client`].
#[derive(Debug, Clone)]
pub struct AuthenticationService<'a> {
    client: &'a Client,
}

impl<'a> AuthenticationService<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Authenticate with username and password.
    ///
    /// `remember` asks the director for a long-lived session. A rejected
    /// password usually comes back as a successful call whose
    /// [`LoginInfo::result`] is not `"OK"`, with lockout details in
    /// [`LoginInfo::can_try`].
    pub async fn login(
        &self,
        ctx: &CallContext,
        username: &str,
        password: &SecretString,
        remember: bool,
    ) -> Result<Reply<LoginInfo>, Error> {
        debug!(username, remember, "logging in");
        let request = RequestEnvelope::new(
            AUTHENTICATION_ACTION,
            "login",
            &(username, password.expose_secret(), remember),
        )?;
        self.client.call_typed(ctx, &request).await
    }

    /// Ask whether the current session is still valid.
    ///
    /// The payload is undocumented and left as raw JSON.
    pub async fn is_logged_in(&self, ctx: &CallContext) -> Result<Reply<Value>, Error> {
        let request = RequestEnvelope::without_data(AUTHENTICATION_ACTION, "isLogged");
        self.client.call(ctx, &request).await
    }

    /// End the current session.
    pub async fn logout(&self, ctx: &CallContext) -> Result<Reply<Value>, Error> {
        debug!("logging out");
        let request = RequestEnvelope::without_data(AUTHENTICATION_ACTION, "logoutCurrentUser");
        self.client.call(ctx, &request).await
    }
}
