//! Structured social-button links: redirect unwrapping and platform classification.

use url::Url;

use crate::SocialLink;

/// Hosts that wrap outbound links as `https://<host>/?url=<encoded destination>`.
const REDIRECT_HOSTS: &[&str] = &["gate.sc"];

const REDIRECT_PARAM: &str = "url";

/// Platform candidates found in the social buttons, first of each kind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct LinkCandidates {
    pub instagram: Option<String>,
    pub channel: Option<String>,
}

/// Unwrap a gating redirector to its real destination.
///
/// Anything that is not a redirector link, or a redirector link without a usable
/// `url` parameter, comes back unchanged.
pub fn resolve_redirect(href: &str) -> String {
    let Ok(parsed) = Url::parse(href) else {
        return href.to_string();
    };
    if !parsed.host_str().is_some_and(is_redirector) {
        return href.to_string();
    }

    // query_pairs already decodes once; destinations are sometimes encoded twice.
    parsed
        .query_pairs()
        .find(|(key, value)| key == REDIRECT_PARAM && !value.is_empty())
        .map(|(_, value)| match urlencoding::decode(&value) {
            Ok(decoded) => decoded.into_owned(),
            Err(_) => value.into_owned(),
        })
        .unwrap_or_else(|| href.to_string())
}

fn is_redirector(host: &str) -> bool {
    REDIRECT_HOSTS.iter().any(|known| {
        host == *known
            || host
                .strip_suffix(known)
                .is_some_and(|prefix| prefix.ends_with('.'))
    })
}

/// Walk the links in order and keep the first Instagram and video-channel URL.
pub(crate) fn classify(links: &[SocialLink]) -> LinkCandidates {
    let mut found = LinkCandidates::default();

    for link in links {
        let real = resolve_redirect(&link.href);
        if found.instagram.is_none() && real.contains("instagram.com") {
            found.instagram = absolute(&real);
        }
        if found.channel.is_none() && real.contains("youtube.com") {
            found.channel = absolute(&real);
        }
        if found.instagram.is_some() && found.channel.is_some() {
            break;
        }
    }

    found
}

/// Keep `candidate` only if it is (or becomes, with an https scheme) an absolute URL.
fn absolute(candidate: &str) -> Option<String> {
    // "host:port/path" parses with the host as its scheme, so only web schemes count.
    if let Ok(url) = Url::parse(candidate) {
        if matches!(url.scheme(), "http" | "https") {
            return url.has_host().then(|| candidate.to_string());
        }
    }
    let prefixed = format!("https://{}", candidate.trim_start_matches('/'));
    match Url::parse(&prefixed) {
        Ok(url) if url.has_host() => Some(prefixed),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(href: &str, label: &str) -> SocialLink {
        SocialLink::new(href, label)
    }

    // --- resolve_redirect ---

    #[test]
    fn gate_link_decodes_destination() {
        let href = "https://gate.sc/?url=https%3A%2F%2Finstagram.com%2Freal&token=abc";
        assert_eq!(resolve_redirect(href), "https://instagram.com/real");
    }

    #[test]
    fn gate_link_double_encoded() {
        let href = "https://gate.sc/?url=https%253A%252F%252Fyoutube.com%252F%2540prod";
        assert_eq!(resolve_redirect(href), "https://youtube.com/@prod");
    }

    #[test]
    fn gate_subdomain_is_a_redirector() {
        let href = "https://www.gate.sc/?url=https%3A%2F%2Fexample.com";
        assert_eq!(resolve_redirect(href), "https://example.com");
    }

    #[test]
    fn lookalike_host_is_not_a_redirector() {
        let href = "https://notgate.sc/?url=https%3A%2F%2Fexample.com";
        assert_eq!(resolve_redirect(href), href);
    }

    #[test]
    fn gate_link_without_url_param_is_verbatim() {
        let href = "https://gate.sc/?token=abc";
        assert_eq!(resolve_redirect(href), href);
    }

    #[test]
    fn gate_link_with_empty_url_param_is_verbatim() {
        let href = "https://gate.sc/?url=";
        assert_eq!(resolve_redirect(href), href);
    }

    #[test]
    fn unparseable_href_is_verbatim() {
        assert_eq!(resolve_redirect("not a url"), "not a url");
        assert_eq!(resolve_redirect(""), "");
    }

    #[test]
    fn plain_link_is_verbatim() {
        let href = "https://instagram.com/someone";
        assert_eq!(resolve_redirect(href), href);
    }

    // --- classify ---

    #[test]
    fn first_candidate_of_each_kind_wins() {
        let links = vec![
            link("https://instagram.com/first", "instagram"),
            link("https://www.youtube.com/@chan", "youtube"),
            link("https://instagram.com/second", "instagram"),
            link("https://youtube.com/@other", "youtube"),
        ];
        let found = classify(&links);
        assert_eq!(found.instagram.as_deref(), Some("https://instagram.com/first"));
        assert_eq!(found.channel.as_deref(), Some("https://www.youtube.com/@chan"));
    }

    #[test]
    fn twitter_and_website_buttons_are_ignored() {
        let links = vec![
            link("https://twitter.com/someone", "twitter"),
            link("https://mysite.com", "website"),
        ];
        assert_eq!(classify(&links), LinkCandidates::default());
    }

    #[test]
    fn schemeless_candidate_gets_https() {
        let links = vec![link(
            "https://gate.sc/?url=instagram.com%2Fbare",
            "instagram",
        )];
        let found = classify(&links);
        assert_eq!(found.instagram.as_deref(), Some("https://instagram.com/bare"));
    }

    #[test]
    fn schemeless_candidate_with_port_gets_https() {
        let links = vec![link("https://gate.sc?url=instagram.com:80/x", "instagram")];
        let found = classify(&links);
        assert_eq!(
            found.instagram.as_deref(),
            Some("https://instagram.com:80/x")
        );
    }

    #[test]
    fn non_url_candidate_is_skipped() {
        let links = vec![
            link("see instagram.com for more", "instagram"),
            link("https://instagram.com/real", "instagram"),
        ];
        let found = classify(&links);
        assert_eq!(found.instagram.as_deref(), Some("https://instagram.com/real"));
    }
}
