//! Login, signup and logout for both deployment modes.
//!
//! Local mode only records a `user` in storage. Backend mode authenticates with
//! an `IdentityProvider`, keeps the provider's token under `authToken` and makes
//! sure the backend has a profile for the uid.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiClient, NewProfile};
use crate::models::User;
use crate::routes::Route;
use crate::storage::{load, save, LocalStorage, StorageError, AUTH_TOKEN_KEY, USER_KEY};

/// Name recorded by the local login, which has no name field.
pub const DEMO_USER_NAME: &str = "Demo User";

const FIREBASE_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("{0}")]
    Identity(String),

    #[error("identity provider unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// An authenticated identity as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySession {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub id_token: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentitySession, AuthError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentitySession, AuthError>;
}

/// Email/password accounts through the Firebase Identity Toolkit REST API.
pub struct FirebaseIdentity {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResponse {
    local_id: String,
    email: String,
    id_token: String,
    #[serde(default)]
    display_name: Option<String>,
}

#[derive(Deserialize)]
struct FirebaseErrorBody {
    error: FirebaseErrorDetail,
}

#[derive(Deserialize)]
struct FirebaseErrorDetail {
    message: String,
}

impl FirebaseIdentity {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, FIREBASE_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn password_call(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<IdentitySession, AuthError> {
        let response = self
            .client
            .post(format!("{}/accounts:{endpoint}", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<FirebaseErrorBody>()
                .await
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("identity provider returned {status}"));
            return Err(AuthError::Identity(message));
        }

        let body: PasswordResponse = response.json().await?;
        Ok(IdentitySession {
            uid: body.local_id,
            email: body.email,
            display_name: body.display_name.filter(|n| !n.trim().is_empty()),
            id_token: body.id_token,
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentity {
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentitySession, AuthError> {
        self.password_call("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentitySession, AuthError> {
        self.password_call("signInWithPassword", email, password).await
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), AuthError> {
        require(&self.name, "Full name")?;
        require(&self.email, "Email")?;
        require(&self.password, "Password")?;
        require(&self.confirm_password, "Password confirmation")?;
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(())
    }
}

fn require(value: &str, field: &'static str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(())
    }
}

struct Backend {
    identity: Arc<dyn IdentityProvider>,
    api: ApiClient,
}

pub struct AuthService {
    storage: Arc<dyn LocalStorage>,
    backend: Option<Backend>,
}

impl AuthService {
    pub fn local(storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            storage,
            backend: None,
        }
    }

    pub fn backend(
        storage: Arc<dyn LocalStorage>,
        identity: Arc<dyn IdentityProvider>,
        api: ApiClient,
    ) -> Self {
        Self {
            storage,
            backend: Some(Backend { identity, api }),
        }
    }

    pub fn is_backend(&self) -> bool {
        self.backend.is_some()
    }

    pub fn api(&self) -> Option<&ApiClient> {
        self.backend.as_ref().map(|b| &b.api)
    }

    pub fn current_user(&self) -> Option<User> {
        load(self.storage.as_ref(), USER_KEY)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Route, AuthError> {
        require(email, "Email")?;
        require(password, "Password")?;

        let user = match &self.backend {
            None => User {
                name: DEMO_USER_NAME.to_string(),
                email: email.trim().to_string(),
                uid: None,
                is_authenticated: true,
            },
            Some(backend) => {
                let session = backend.identity.sign_in(email.trim(), password).await?;
                let name = match backend.api.get_profile(&session.uid).await {
                    Ok(profile) => profile.name,
                    Err(e) => {
                        warn!("Could not load profile for {}: {e}", session.uid);
                        fallback_name(&session)
                    }
                };
                save(self.storage.as_ref(), AUTH_TOKEN_KEY, &session.id_token)?;
                User {
                    name,
                    email: session.email,
                    uid: Some(session.uid),
                    is_authenticated: true,
                }
            }
        };

        save(self.storage.as_ref(), USER_KEY, &user)?;
        info!(email = %user.email, "Logged in");
        Ok(Route::Profile)
    }

    /// Creates the account. In backend mode a failed profile create is logged and
    /// the signup still succeeds.
    pub async fn signup(&self, form: &SignupForm) -> Result<Route, AuthError> {
        form.validate()?;
        let name = form.name.trim().to_string();
        let email = form.email.trim().to_string();

        let user = match &self.backend {
            None => User {
                name,
                email,
                uid: None,
                is_authenticated: true,
            },
            Some(backend) => {
                let session = backend.identity.sign_up(&email, &form.password).await?;
                save(self.storage.as_ref(), AUTH_TOKEN_KEY, &session.id_token)?;

                let profile = NewProfile {
                    uid: session.uid.clone(),
                    email: session.email.clone(),
                    name: name.clone(),
                    phone: None,
                };
                match backend.api.create_profile(&profile).await {
                    Ok(created) => info!("{}", created.message),
                    Err(e) => warn!("Profile creation failed for {}: {e}", session.uid),
                }

                User {
                    name,
                    email: session.email,
                    uid: Some(session.uid),
                    is_authenticated: true,
                }
            }
        };

        save(self.storage.as_ref(), USER_KEY, &user)?;
        info!(email = %user.email, "Signed up");
        Ok(Route::Profile)
    }

    pub fn logout(&self) -> Result<Route, AuthError> {
        self.storage.remove_item(USER_KEY)?;
        self.storage.remove_item(AUTH_TOKEN_KEY)?;
        Ok(Route::Login)
    }
}

fn fallback_name(session: &IdentitySession) -> String {
    session.display_name.clone().unwrap_or_else(|| {
        session
            .email
            .split('@')
            .next()
            .unwrap_or(DEMO_USER_NAME)
            .to_string()
    })
}
