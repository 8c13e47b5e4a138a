#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// The normalized record for the one authenticated user in this browser
/// context.
///
/// `token` is the provider-issued refresh token and is treated as a secret:
/// `Session` deliberately does not implement `Serialize`, so the token cannot
/// leave the client by accident. Anything sent to the server goes through
/// [`UserRecord`] instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub token: String,
    pub provider: String,
    pub photo_url: Option<String>,
}

/// Token-stripped projection of a [`Session`] for the server-side
/// create-or-update-user call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub user_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub provider: String,
    pub photo_url: Option<String>,
}

impl From<&Session> for UserRecord {
    fn from(session: &Session) -> Self {
        Self {
            user_id: session.user_id.clone(),
            email: session.email.clone(),
            name: session.name.clone(),
            provider: session.provider.clone(),
            photo_url: session.photo_url.clone(),
        }
    }
}

/// External identity providers the app can sign in with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    Google,
    Facebook,
}

impl ProviderKind {
    /// The identifier the provider SDK reports in `providerData` entries.
    #[must_use]
    pub fn provider_id(self) -> &'static str {
        match self {
            Self::Google => "google.com",
            Self::Facebook => "facebook.com",
        }
    }

    /// Short name passed to the SDK shim's popup call.
    #[must_use]
    pub fn popup_name(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Facebook => "facebook",
        }
    }
}

/// Raw identity record as delivered by the provider SDK.
#[derive(Clone, Debug, Deserialize)]
pub struct RawIdentity {
    pub uid: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
    #[serde(rename = "providerData", default)]
    pub provider_data: Vec<RawProviderData>,
    #[serde(rename = "photoURL", default)]
    pub photo_url: Option<String>,
}

/// One linked-provider entry on a raw identity record.
#[derive(Clone, Debug, Deserialize)]
pub struct RawProviderData {
    #[serde(rename = "providerId")]
    pub provider_id: String,
}

/// Payload for `POST /api/posts`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewPost {
    pub title: String,
    pub tags: Vec<String>,
    pub body: String,
    pub cover_image: Option<String>,
}

/// Server response after creating a post.
#[derive(Clone, Debug, Deserialize)]
pub struct CreatedPost {
    pub id: String,
}
