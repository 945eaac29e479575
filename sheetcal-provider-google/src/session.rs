//! Loads a stored Google session (access token) that we can use to call the gcal API.
//!
//! Sessions are written by whatever performed the initial OAuth consent; this
//! module only reads them and refreshes expired access tokens.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::app_config::{AppConfig, base_dir};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

pub struct Session {
    account_email: String,
    data: SessionData,
}

#[derive(Serialize, Deserialize, Clone)]
pub struct SessionData {
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    #[serde(default)]
    refresh_token: Option<String>,
}

impl Session {
    fn session_dir() -> Result<PathBuf> {
        Ok(base_dir()?.join("session"))
    }

    fn path_for_account_email(account_email: &str) -> Result<PathBuf> {
        let email_slug = account_email.replace(['/', '\\', ':'], "_");

        Ok(Self::session_dir()?.join(format!("{}.toml", email_slug)))
    }

    fn path(&self) -> Result<PathBuf> {
        Self::path_for_account_email(&self.account_email)
    }

    pub fn account_email(&self) -> &str {
        &self.account_email
    }

    pub fn access_token(&self) -> &str {
        &self.data.access_token
    }

    /// Load the session for `account_email`, or the only stored session when
    /// no account is given. Refreshes it if expired.
    pub async fn discover(account_email: Option<&str>) -> Result<Self> {
        match account_email {
            Some(email) => Self::load_valid(email).await,
            None => {
                let accounts = Self::stored_accounts()?;
                match accounts.as_slice() {
                    [only] => Self::load_valid(only).await,
                    [] => anyhow::bail!(
                        "No Google session found in {}",
                        Self::session_dir()?.display()
                    ),
                    many => anyhow::bail!(
                        "Several Google sessions found ({}). Pick one with --account",
                        many.join(", ")
                    ),
                }
            }
        }
    }

    /// Account names with a stored session file.
    pub fn stored_accounts() -> Result<Vec<String>> {
        let dir = Self::session_dir()?;
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut accounts: Vec<String> = std::fs::read_dir(&dir)
            .with_context(|| format!("Failed to list sessions in {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
            .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().to_string()))
            .collect();
        accounts.sort();

        Ok(accounts)
    }

    // Load a session and refresh it if expired:
    pub async fn load_valid(account_email: &str) -> Result<Self> {
        let mut session = Self::load(account_email)?;

        if session.is_expired() {
            session.refresh().await?;
        }

        Ok(session)
    }

    fn load(account_email: &str) -> Result<Self> {
        let path = Self::path_for_account_email(account_email)?;

        if !path.exists() {
            anyhow::bail!("Google OAuth session for {} not found!", account_email);
        }

        let contents = std::fs::read_to_string(&path).with_context(|| {
            format!(
                "Failed to read Google OAuth session from {}",
                path.display()
            )
        })?;

        let data = Self::parse(&contents).with_context(|| {
            format!(
                "Failed to parse Google OAuth session from {}",
                path.display()
            )
        })?;

        debug!(account = account_email, "loaded Google session");

        Ok(Session {
            account_email: account_email.to_string(),
            data,
        })
    }

    fn parse(contents: &str) -> Result<SessionData> {
        Ok(toml::from_str(contents)?)
    }

    pub fn save(&self) -> Result<()> {
        let contents = toml::to_string_pretty(&self.data).context("Failed to serialize session")?;

        let path = self.path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write session to {}", path.display()))?;

        // Set to owner-only (0600) since file contains OAuth tokens:
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to set permissions on {}", path.display()))?;
        }

        Ok(())
    }

    fn is_expired(&self) -> bool {
        Utc::now() >= self.data.expires_at
    }

    async fn refresh(&mut self) -> Result<()> {
        let app_config = AppConfig::load()?;

        info!(account = %self.account_email, "refreshing Google access token");

        let response = reqwest::Client::new()
            .post(TOKEN_URL)
            .form(&[
                ("client_id", app_config.client_id.as_str()),
                ("client_secret", app_config.client_secret.as_str()),
                ("refresh_token", self.data.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .context("Failed to send token refresh request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            anyhow::bail!("Failed to refresh token: HTTP {} - {}", status, error_text);
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token refresh response")?;

        self.apply(tokens);
        self.save()?;

        Ok(())
    }

    fn apply(&mut self, tokens: TokenResponse) {
        self.data.access_token = tokens.access_token;
        self.data.expires_at = Utc::now() + Duration::seconds(tokens.expires_in);

        // Google typically doesn't return a new refresh_token on refresh
        if let Some(refresh_token) = tokens.refresh_token.filter(|t| !t.is_empty()) {
            self.data.refresh_token = refresh_token;
        }
    }
}
