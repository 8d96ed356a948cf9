//! # beatlead-contact
//!
//! Deterministic contact extraction for artist profiles. Given a profile's bio text
//! and its social-button links, build a [`ContactRecord`] with email, Instagram,
//! Twitter, website and video-channel fields.
//!
//! ```
//! use beatlead_contact::{extract_contact, SocialLink};
//!
//! let links = [SocialLink::new(
//!     "https://gate.sc/?url=https%3A%2F%2Finstagram.com%2Freal",
//!     "instagram",
//! )];
//! let record = extract_contact(
//!     "https://soundcloud.com/someone",
//!     "Someone",
//!     "bookings: someone@example.com",
//!     &links,
//! );
//! assert_eq!(record.email, "someone@example.com");
//! assert_eq!(record.instagram_url, "https://instagram.com/real");
//! ```

mod bio;
mod links;
mod producer;

pub use links::resolve_redirect;
pub use producer::{normalize_producer, ProducerName};

use serde::{Deserialize, Serialize};
use std::fmt;

/// An outbound link read from a profile's social buttons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub href: String,
    /// Visible text of the button, lower-cased by the reader.
    #[serde(default)]
    pub label: String,
}

impl SocialLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// What a page reader managed to pull off a profile page.
///
/// `None` means the element could not be located, which is different from an
/// element that exists but is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub profile_url: String,
    pub display_name: Option<String>,
    pub bio_text: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
}

/// Contact details for one artist profile. Empty string means "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub profile_url: String,
    pub display_name: String,
    pub email: String,
    pub instagram_url: String,
    pub twitter_url: String,
    pub website_url: String,
    pub channel_url: String,
    /// Raw description, kept for auditing what the fields came from.
    pub bio_text: String,
}

impl ContactRecord {
    pub fn has_instagram(&self) -> bool {
        self.instagram_url.to_lowercase().contains("instagram.com")
    }
}

/// Profile element a reader could not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    DisplayName,
    Bio,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DisplayName => f.write_str("display name"),
            Self::Bio => f.write_str("bio"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{element} not found on {profile_url}")]
    MissingElement {
        profile_url: String,
        element: Element,
    },
    #[error("profile url is empty")]
    EmptyProfileUrl,
}

pub type Result<T> = std::result::Result<T, Error>;

/// Build a record from a snapshot, or report which required element was missing.
pub fn extract(snapshot: &ProfileSnapshot) -> Result<ContactRecord> {
    if snapshot.profile_url.is_empty() {
        return Err(Error::EmptyProfileUrl);
    }
    let missing = |element| Error::MissingElement {
        profile_url: snapshot.profile_url.clone(),
        element,
    };
    let name = snapshot
        .display_name
        .as_deref()
        .ok_or_else(|| missing(Element::DisplayName))?;
    let bio = snapshot
        .bio_text
        .as_deref()
        .ok_or_else(|| missing(Element::Bio))?;

    Ok(extract_contact(
        &snapshot.profile_url,
        name,
        bio,
        &snapshot.social_links,
    ))
}

/// Extract contact fields from bio text and social links. Never fails.
///
/// Social buttons are consulted before the bio for Instagram and the video
/// channel; Twitter and website come from the bio only.
pub fn extract_contact(
    profile_url: &str,
    display_name: &str,
    bio_text: &str,
    social_links: &[SocialLink],
) -> ContactRecord {
    let from_links = links::classify(social_links);

    let instagram_url = from_links
        .instagram
        .or_else(|| bio::instagram_handle(bio_text).map(bio::instagram_url))
        .unwrap_or_default();

    ContactRecord {
        profile_url: profile_url.to_string(),
        display_name: display_name.to_string(),
        email: bio::email(bio_text).unwrap_or_default().to_string(),
        instagram_url,
        twitter_url: bio::twitter_handle(bio_text)
            .map(bio::twitter_url)
            .unwrap_or_default(),
        website_url: bio::website(bio_text).unwrap_or_default().to_string(),
        channel_url: from_links.channel.unwrap_or_default(),
        bio_text: bio_text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://soundcloud.com/artist";

    fn snapshot(name: Option<&str>, bio: Option<&str>) -> ProfileSnapshot {
        ProfileSnapshot {
            profile_url: URL.into(),
            display_name: name.map(String::from),
            bio_text: bio.map(String::from),
            social_links: Vec::new(),
        }
    }

    #[test]
    fn email_only_bio() {
        let r = extract_contact(URL, "Artist", "Contact: john@example.com for beats", &[]);
        assert_eq!(r.email, "john@example.com");
        assert!(r.instagram_url.is_empty());
        assert!(r.twitter_url.is_empty());
        assert!(r.website_url.is_empty());
        assert!(r.channel_url.is_empty());
        assert_eq!(r.bio_text, "Contact: john@example.com for beats");
    }

    #[test]
    fn instagram_from_bio_label() {
        let r = extract_contact(URL, "Artist", "ig: cool.guy", &[]);
        assert_eq!(r.instagram_url, "https://instagram.com/cool.guy");
    }

    #[test]
    fn instagram_from_gate_link() {
        let links = [SocialLink::new(
            "https://gate.sc/?url=https%3A%2F%2Finstagram.com%2Freal",
            "Instagram",
        )];
        let r = extract_contact(URL, "Artist", "", &links);
        assert_eq!(r.instagram_url, "https://instagram.com/real");
        assert!(r.email.is_empty());
    }

    #[test]
    fn structured_link_beats_bio_handle() {
        let links = [SocialLink::new("https://www.instagram.com/from.button", "instagram")];
        let r = extract_contact(URL, "Artist", "ig: from.bio", &links);
        assert_eq!(r.instagram_url, "https://www.instagram.com/from.button");
    }

    #[test]
    fn channel_only_from_links() {
        let r = extract_contact(URL, "Artist", "youtube.com/@inbio", &[]);
        assert!(r.channel_url.is_empty());

        let links = [SocialLink::new("https://youtube.com/@chan", "youtube")];
        let r = extract_contact(URL, "Artist", "", &links);
        assert_eq!(r.channel_url, "https://youtube.com/@chan");
    }

    #[test]
    fn twitter_button_does_not_fill_twitter() {
        let links = [SocialLink::new("https://twitter.com/button", "twitter")];
        let r = extract_contact(URL, "Artist", "", &links);
        assert!(r.twitter_url.is_empty());
    }

    #[test]
    fn full_bio() {
        let bio = "Twitter: @loudpack\n\
                   bookings: mgmt@artist.co\n\
                   stream: https://artist.co/music";
        let r = extract_contact(URL, "Artist", bio, &[]);
        assert_eq!(r.email, "mgmt@artist.co");
        assert_eq!(r.twitter_url, "https://twitter.com/loudpack");
        assert_eq!(r.website_url, "https://artist.co/music");
        assert_eq!(r.display_name, "Artist");
        assert_eq!(r.profile_url, URL);
    }

    #[test]
    fn extraction_is_idempotent() {
        let links = [
            SocialLink::new("https://gate.sc/?url=https%3A%2F%2Finstagram.com%2Fa", "ig"),
            SocialLink::new("https://youtube.com/@b", "yt"),
        ];
        let bio = "x@y.com tw: @c https://d.com";
        let a = extract_contact(URL, "N", bio, &links);
        let b = extract_contact(URL, "N", bio, &links);
        assert_eq!(a, b);
    }

    #[test]
    fn extract_missing_bio() {
        let err = extract(&snapshot(Some("Artist"), None)).unwrap_err();
        assert_eq!(
            err,
            Error::MissingElement {
                profile_url: URL.into(),
                element: Element::Bio,
            }
        );
        assert_eq!(err.to_string(), format!("bio not found on {}", URL));
    }

    #[test]
    fn extract_missing_name() {
        let err = extract(&snapshot(None, Some("bio"))).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingElement {
                element: Element::DisplayName,
                ..
            }
        ));
    }

    #[test]
    fn extract_empty_url() {
        let mut s = snapshot(Some("Artist"), Some(""));
        s.profile_url.clear();
        assert_eq!(extract(&s).unwrap_err(), Error::EmptyProfileUrl);
    }

    #[test]
    fn extract_empty_bio_is_not_missing() {
        let r = extract(&snapshot(Some(""), Some(""))).unwrap();
        assert_eq!(r.profile_url, URL);
        assert_eq!(
            r,
            ContactRecord {
                profile_url: URL.into(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn record_helpers() {
        let mut r = ContactRecord {
            profile_url: URL.into(),
            ..Default::default()
        };
        assert!(!r.has_instagram());
        r.instagram_url = "https://Instagram.com/x".into();
        assert!(r.has_instagram());
    }

    #[test]
    fn record_serializes_with_field_names() {
        let r = extract_contact(URL, "Artist", "a@b.co", &[]);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["profile_url"], URL);
        assert_eq!(json["display_name"], "Artist");
        assert_eq!(json["email"], "a@b.co");
        assert_eq!(json["instagram_url"], "");
        assert_eq!(json.as_object().unwrap().len(), 8);
    }
}
