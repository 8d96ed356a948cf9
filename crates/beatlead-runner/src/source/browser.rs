use super::{with_retry, LeadSource};
use crate::config::{Config, RetryConfig, Selectors, Sites, Timing};
use crate::{Error, Result};
use beatlead_contact::{ProfileSnapshot, SocialLink};
use eoka::{Browser, Page};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Deserialize)]
struct RawProfile {
    name: Option<String>,
    bio: Option<String>,
    #[serde(default)]
    links: Vec<SocialLink>,
}

/// [`LeadSource`] backed by a single stealth browser page.
pub struct BrowserSource {
    browser: Browser,
    page: Page,
    sites: Sites,
    selectors: Selectors,
    timing: Timing,
    retry: Option<RetryConfig>,
    profiles_read: usize,
}

impl BrowserSource {
    /// Launch a browser configured from `config.browser`.
    pub async fn launch(config: &Config) -> Result<Self> {
        let browser_config = &config.browser;
        let stealth = eoka::StealthConfig {
            headless: browser_config.headless,
            proxy: browser_config.proxy.clone(),
            user_agent: browser_config.user_agent.clone(),
            viewport_width: browser_config
                .viewport
                .as_ref()
                .map(|v| v.width)
                .unwrap_or(1280),
            viewport_height: browser_config
                .viewport
                .as_ref()
                .map(|v| v.height)
                .unwrap_or(720),
            ..Default::default()
        };

        debug!(
            "Launching browser (headless: {}, proxy: {:?})",
            browser_config.headless, browser_config.proxy
        );
        let browser = Browser::launch_with_config(stealth).await?;
        let page = browser.new_page("about:blank").await?;

        Ok(Self {
            browser,
            page,
            sites: config.sites.clone(),
            selectors: config.selectors.clone(),
            timing: config.timing.clone(),
            retry: config.retry().cloned(),
            profiles_read: 0,
        })
    }

    /// Close the browser.
    pub async fn close(self) -> Result<()> {
        self.browser.close().await?;
        Ok(())
    }

    async fn goto(&self, url: &str) -> Result<()> {
        let what = format!("Navigation to {}", url);
        with_retry(self.retry.as_ref(), &what, || async {
            self.page.goto(url).await.map(|_| ()).map_err(Error::from)
        })
        .await
    }

    /// Evaluate a script that returns `JSON.stringify(...)` and decode it.
    async fn eval_json<T: DeserializeOwned>(&self, js: &str) -> Result<T> {
        let json: String = self.page.evaluate(js).await?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl LeadSource for BrowserSource {
    async fn channel_names(&mut self, query: &str, limit: usize) -> Result<Vec<String>> {
        let url = self.sites.video_url(query);
        info!("Searching videos: {}", query);
        self.goto(&url).await?;
        self.page
            .wait_for(&self.selectors.video_result, self.timing.element_timeout_ms)
            .await?;

        let js = format!(
            r#"(() => {{
                const names = [];
                const videos = Array.from(document.querySelectorAll({videos})).slice(0, {limit});
                for (const video of videos) {{
                    const channel = video.querySelector({channel});
                    if (channel) names.push(channel.textContent.trim());
                }}
                return JSON.stringify(names);
            }})()"#,
            videos = serde_json::to_string(&self.selectors.video_result)?,
            channel = serde_json::to_string(&self.selectors.channel_name)?,
            limit = limit,
        );
        let names: Vec<String> = self.eval_json(&js).await?;
        debug!("Channel names: {:?}", names);
        Ok(names)
    }

    async fn profile_urls(&mut self, producer: &str) -> Result<Vec<String>> {
        let url = self.sites.audio_url(producer);
        info!("Searching credits for: {}", producer);
        self.goto(&url).await?;
        self.page.wait(self.timing.search_wait_ms).await;

        let js = format!(
            "JSON.stringify(Array.from(document.querySelectorAll({})).map(a => a.href).filter(Boolean))",
            serde_json::to_string(&self.selectors.result_artist)?
        );
        let urls: Vec<String> = self.eval_json(&js).await?;
        debug!("{} profile links for {}", urls.len(), producer);
        Ok(urls)
    }

    async fn profile(&mut self, url: &str) -> Result<ProfileSnapshot> {
        if self.profiles_read > 0 && self.timing.between_profiles_ms > 0 {
            self.page.wait(self.timing.between_profiles_ms).await;
        }
        self.profiles_read += 1;

        debug!("Reading profile: {}", url);
        self.goto(url).await?;
        self.page.wait(self.timing.profile_wait_ms).await;
        if let Err(e) = self
            .page
            .wait_for(&self.selectors.profile_name, self.timing.element_timeout_ms)
            .await
        {
            debug!("Name element never appeared on {}: {}", url, e);
        }

        let js = format!(
            r#"(() => {{
                const name = document.querySelector({name});
                const bio = document.querySelector({bio});
                const links = Array.from(document.querySelectorAll({social})).map(a => ({{
                    href: a.href || '',
                    label: (a.textContent || '').trim().toLowerCase(),
                }}));
                return JSON.stringify({{
                    name: name ? name.textContent.trim() : null,
                    bio: bio ? bio.innerText : null,
                    links,
                }});
            }})()"#,
            name = serde_json::to_string(&self.selectors.profile_name)?,
            bio = serde_json::to_string(&self.selectors.profile_bio)?,
            social = serde_json::to_string(&self.selectors.social_link)?,
        );
        let raw: RawProfile = self.eval_json(&js).await.map_err(|e| match e {
            Error::Json(e) => Error::Page(format!("unreadable profile data on {}: {}", url, e)),
            other => other,
        })?;

        Ok(ProfileSnapshot {
            profile_url: url.to_string(),
            display_name: raw.name,
            bio_text: raw.bio,
            social_links: raw.links,
        })
    }
}
