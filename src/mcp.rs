use beatlead_contact::{extract_contact, normalize_producer, ContactRecord, SocialLink};
use beatlead_runner::{collect_leads, BrowserSource, Config, LeadReport};
use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router, ServerHandler,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ScrapeLeadsRequest {
    #[schemars(description = "Artist the beats are styled after, e.g. \"Drake\"")]
    pub search_term: String,
    #[schemars(description = "Number of producers to take from the video search (default 3)")]
    pub producers: Option<usize>,
    #[schemars(description = "Maximum artist profiles per producer (default 5)")]
    pub artists_per_producer: Option<usize>,
    #[schemars(description = "Only return leads with an Instagram profile (default true)")]
    pub require_instagram: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LinkParam {
    #[schemars(description = "Link href, possibly a gate.sc redirect")]
    pub href: String,
    #[schemars(description = "Visible button text")]
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ExtractContactRequest {
    #[schemars(description = "Profile URL the text came from")]
    pub profile_url: String,
    #[schemars(description = "Artist display name")]
    #[serde(default)]
    pub display_name: String,
    #[schemars(description = "Profile bio / description text")]
    #[serde(default)]
    pub bio_text: String,
    #[schemars(description = "Social-button links in page order")]
    #[serde(default)]
    pub social_links: Vec<LinkParam>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct NormalizeRequest {
    #[schemars(description = "Video channel display name")]
    pub channel_name: String,
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

fn err(e: impl std::fmt::Display) -> ErrorData {
    ErrorData::internal_error(e.to_string(), None::<Value>)
}

fn invalid(e: impl std::fmt::Display) -> ErrorData {
    ErrorData::invalid_params(e.to_string(), None::<Value>)
}

fn text_ok(s: impl Into<String>) -> Result<CallToolResult, ErrorData> {
    Ok(CallToolResult::success(vec![Content::text(s.into())]))
}

fn json_ok(value: &Value) -> Result<CallToolResult, ErrorData> {
    text_ok(serde_json::to_string_pretty(value).map_err(err)?)
}

/// Build the run config for a scrape request.
fn scrape_config(req: &ScrapeLeadsRequest) -> Result<Config, ErrorData> {
    let term = req.search_term.trim();
    if term.is_empty() {
        return Err(invalid("search_term is required"));
    }
    let mut config = Config::for_search(term);
    if let Some(n) = req.producers {
        config.search.producers = n;
    }
    if let Some(n) = req.artists_per_producer {
        config.search.artists_per_producer = n;
    }
    config.search.require_instagram = req.require_instagram.unwrap_or(true);
    config.validate().map_err(invalid)?;
    Ok(config)
}

fn report_json(report: &LeadReport) -> Value {
    json!({
        "success": true,
        "count": report.leads.len(),
        "producers": report.producers,
        "skipped": report.skipped,
        "data": report.leads,
    })
}

fn contact_from_request(req: &ExtractContactRequest) -> ContactRecord {
    let links: Vec<SocialLink> = req
        .social_links
        .iter()
        .map(|l| SocialLink::new(l.href.clone(), l.label.trim().to_lowercase()))
        .collect();
    extract_contact(&req.profile_url, &req.display_name, &req.bio_text, &links)
}

#[derive(Clone)]
pub struct LeadServer {
    source: Arc<Mutex<Option<BrowserSource>>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl LeadServer {
    pub fn new() -> Self {
        Self {
            source: Arc::new(Mutex::new(None)),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Find artists using beats from '<search_term> type beat' producers and extract their contact info. Launches the browser on first call; takes minutes."
    )]
    async fn scrape_leads(
        &self,
        req: Parameters<ScrapeLeadsRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        let config = scrape_config(&req.0)?;

        let mut guard = self.source.lock().await;
        if guard.is_none() {
            info!("Launching browser");
            *guard = Some(BrowserSource::launch(&config).await.map_err(err)?);
        }
        let source = guard
            .as_mut()
            .ok_or_else(|| err("browser failed to start"))?;

        let report = collect_leads(source, &config.search).await.map_err(err)?;
        info!(
            "Scrape for {} finished: {} leads",
            config.search.term,
            report.leads.len()
        );
        json_ok(&report_json(&report))
    }

    #[tool(
        description = "Extract email, Instagram, Twitter, website and YouTube channel from a profile's bio text and social links. No browser needed."
    )]
    async fn extract_contact(
        &self,
        req: Parameters<ExtractContactRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        if req.0.profile_url.trim().is_empty() {
            return Err(invalid("profile_url is required"));
        }
        let record = contact_from_request(&req.0);
        json_ok(&serde_json::to_value(&record).map_err(err)?)
    }

    #[tool(description = "Strip a trailing 'type beat(s)' / 'beat(s)' from a channel name.")]
    async fn normalize_producer(
        &self,
        req: Parameters<NormalizeRequest>,
    ) -> Result<CallToolResult, ErrorData> {
        text_ok(normalize_producer(&req.0.channel_name))
    }

    #[tool(description = "Close the browser and release resources.")]
    async fn close(&self) -> Result<CallToolResult, ErrorData> {
        let mut guard = self.source.lock().await;
        if let Some(source) = guard.take() {
            source.close().await.map_err(err)?;
        }
        text_ok("Browser closed.")
    }
}

#[tool_handler]
impl ServerHandler for LeadServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "beatlead".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Artist lead discovery. 'scrape_leads' searches YouTube for '<term> type beat', \
                 derives producer names, finds SoundCloud artists crediting them and returns \
                 their contact info as JSON. 'extract_contact' and 'normalize_producer' run the \
                 extraction rules on text you already have. Call 'close' when done."
                    .into(),
            ),
        }
    }
}

pub async fn run_server() -> anyhow::Result<()> {
    use rmcp::ServiceExt;

    let server = LeadServer::new();
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    Ok(())
}
