use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use sheetcal_core::{
    CalendarListEntry, CalendarService, CreatedEvent, ResolvedEvent, SheetCalError,
    SheetCalResult,
};
use tracing::debug;
use url::Url;

use crate::convert::{FromGoogle, ToGoogle};
use crate::session::Session;
use crate::types::{GoogleCalendarList, GoogleCreatedEvent, GoogleSetting};

const API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar client for one authenticated account.
pub struct GoogleCalendar {
    http: Client,
    account: String,
    access_token: String,
}

impl GoogleCalendar {
    /// Load (and refresh if needed) the stored session for `account`, or the
    /// only stored session when `account` is `None`.
    pub async fn connect(account: Option<&str>) -> Result<Self> {
        let session = Session::discover(account).await?;

        Ok(GoogleCalendar {
            http: Client::new(),
            account: session.account_email().to_string(),
            access_token: session.access_token().to_string(),
        })
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(&self.access_token)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        parse(response).await
    }

    async fn fetch_calendars(&self) -> Result<Vec<CalendarListEntry>> {
        let mut calendars = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = endpoint(&["users", "me", "calendarList"])?;
            if let Some(token) = &page_token {
                url.query_pairs_mut().append_pair("pageToken", token);
            }

            let page: GoogleCalendarList =
                self.get(url).await.context("Failed to fetch calendars")?;
            calendars.extend(page.items.into_iter().map(CalendarListEntry::from_google));

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(calendars)
    }

    async fn fetch_timezone(&self) -> Result<String> {
        let url = endpoint(&["users", "me", "settings", "timezone"])?;

        let setting: GoogleSetting = self
            .get(url)
            .await
            .context("Failed to fetch timezone setting")?;

        Ok(setting.value)
    }

    async fn insert_event(&self, event: &ResolvedEvent) -> Result<CreatedEvent> {
        let url = endpoint(&["calendars", event.calendar_id(), "events"])?;
        let body = event.to_google();

        debug!(%url, summary = %body.summary, "POST");
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to create event: {}", body.summary))?;

        let created: GoogleCreatedEvent = parse(response)
            .await
            .with_context(|| format!("Failed to create event: {}", body.summary))?;

        Ok(CreatedEvent::from_google(created))
    }
}

impl CalendarService for GoogleCalendar {
    async fn list_calendars(&self) -> SheetCalResult<Vec<CalendarListEntry>> {
        self.fetch_calendars().await.map_err(remote)
    }

    async fn default_timezone(&self) -> SheetCalResult<String> {
        self.fetch_timezone().await.map_err(remote)
    }

    async fn create_event(&self, event: &ResolvedEvent) -> SheetCalResult<CreatedEvent> {
        self.insert_event(event).await.map_err(remote)
    }
}

fn remote(e: anyhow::Error) -> SheetCalError {
    SheetCalError::RemoteService(format!("{:#}", e))
}

/// API URL with each segment percent-encoded (calendar ids contain `@` and `#`).
fn endpoint(segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(API_BASE)?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("{} cannot be a base URL", API_BASE))?
        .extend(segments);
    Ok(url)
}

async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response".to_string());
        anyhow::bail!("HTTP {} - {}", status, error_body);
    }

    response
        .json()
        .await
        .context("Failed to parse response body")
}
