//! Producer search → credited artists → contact records.

use crate::config::SearchConfig;
use crate::source::LeadSource;
use crate::Result;
use beatlead_contact::{ContactRecord, ProducerName};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Outcome of one lead-collection run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeadReport {
    pub search_term: String,
    /// Producer names searched, in video-result order.
    pub producers: Vec<String>,
    /// Records in discovery order.
    pub leads: Vec<ContactRecord>,
    /// Profiles that could not be read or lacked a required element.
    pub skipped: usize,
    /// Records dropped by `require_instagram`.
    pub filtered: usize,
}

/// Run the whole chain against `source`.
///
/// Only the initial video search is fatal. A failing producer search or
/// profile is logged and the run moves on.
pub async fn collect_leads<S: LeadSource>(
    source: &mut S,
    search: &SearchConfig,
) -> Result<LeadReport> {
    let query = search.query();
    info!("Searching producers: \"{}\"", query);
    let channels = source.channel_names(&query, search.producers).await?;

    let producers: Vec<ProducerName> = channels
        .iter()
        .map(|channel| ProducerName::from_channel(channel))
        .filter(|producer| {
            if producer.is_empty() {
                debug!("Channel name was all decoration, skipping");
            }
            !producer.is_empty()
        })
        .collect();
    info!(
        "Found producers: {:?}",
        producers.iter().map(ProducerName::as_str).collect::<Vec<_>>()
    );

    let mut report = LeadReport {
        search_term: search.term.clone(),
        producers: producers.iter().map(|p| p.to_string()).collect(),
        ..Default::default()
    };

    for producer in &producers {
        info!("Searching artists using beats from {}", producer);
        let urls = match source.profile_urls(producer.as_str()).await {
            Ok(urls) => urls,
            Err(e) => {
                warn!("Credit search for {} failed: {}", producer, e);
                continue;
            }
        };

        let before = report.leads.len();
        for url in unique_capped(urls, search.artists_per_producer) {
            let Some(record) = scrape_profile(source, &url).await else {
                report.skipped += 1;
                continue;
            };
            if search.require_instagram && !record.has_instagram() {
                debug!("No instagram for {}, dropping", url);
                report.filtered += 1;
                continue;
            }
            report.leads.push(record);
        }
        info!(
            "Found {} artists for producer {}",
            report.leads.len() - before,
            producer
        );
    }

    Ok(report)
}

async fn scrape_profile<S: LeadSource>(source: &mut S, url: &str) -> Option<ContactRecord> {
    let snapshot = match source.profile(url).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("Error scraping {}: {}", url, e);
            return None;
        }
    };
    match beatlead_contact::extract(&snapshot) {
        Ok(record) => Some(record),
        Err(e) => {
            warn!("Skipping profile: {}", e);
            None
        }
    }
}

/// First `cap` distinct non-empty URLs, order preserved.
fn unique_capped(urls: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter(|url| !url.is_empty() && seen.insert(url.clone()))
        .take(cap)
        .collect()
}
