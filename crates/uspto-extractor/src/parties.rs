//! Inventors, applicant organizations and attorneys

use crate::pattern::TagPattern;
use crate::tree::XmlElement;
use once_cell::sync::Lazy;

/// Placeholder the source uses for a field nobody filled in
pub const UNKNOWN_SENTINEL: &str = "unknown";

static PARTIES: Lazy<TagPattern> = Lazy::new(|| TagPattern::contains("parties"));
static INVENTORS_OR_APPLICANTS: Lazy<TagPattern> = Lazy::new(|| {
    TagPattern::any_of([
        TagPattern::contains("inventors"),
        TagPattern::contains("applicants"),
    ])
});
static APPLICANTS: Lazy<TagPattern> = Lazy::new(|| TagPattern::contains("applicants"));
static AGENTS: Lazy<TagPattern> = Lazy::new(|| TagPattern::contains("agents"));

/// The four party lists of one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parties {
    /// Inventor names (applicants double as inventors in newer schemas)
    pub authors: Vec<String>,
    /// Applicant organizations
    pub organizations: Vec<String>,
    /// Attorney names
    pub attorneys: Vec<String>,
    /// Attorney organizations
    pub attorney_organizations: Vec<String>,
}

/// Join the present, non-sentinel field texts with `separator`
fn join_fields(addressbook: &XmlElement, fields: &[&str], separator: &str) -> Option<String> {
    let parts: Vec<String> = fields
        .iter()
        .filter_map(|field| addressbook.text_of(field))
        .filter(|value| !value.is_empty() && value != UNKNOWN_SENTINEL)
        .collect();

    let joined = parts.join(separator).trim().to_string();
    (!joined.is_empty()).then_some(joined)
}

/// `First Last` from an addressbook, or `None` when nothing usable is present
pub fn build_name(addressbook: &XmlElement) -> Option<String> {
    join_fields(addressbook, &["first-name", "last-name"], " ")
}

/// `Org, City, Country` from an addressbook, or `None` when nothing usable is present
pub fn build_org(addressbook: &XmlElement) -> Option<String> {
    join_fields(addressbook, &["orgname", "city", "country"], ", ")
}

/// Collect parties from every `*parties` subtree under `root`
pub fn extract_parties(root: &XmlElement) -> Parties {
    let addressbook = TagPattern::from("addressbook");
    let agent = TagPattern::from("agent");
    let mut parties = Parties::default();

    for scope in root.find_all(&PARTIES) {
        for group in scope.find_all(&INVENTORS_OR_APPLICANTS) {
            parties
                .authors
                .extend(group.find_all(&addressbook).into_iter().filter_map(build_name));
        }

        for group in scope.find_all(&APPLICANTS) {
            parties
                .organizations
                .extend(group.find_all(&addressbook).into_iter().filter_map(build_org));
        }

        for group in scope.find_all(&AGENTS) {
            let attorneys = group
                .find_all(&agent)
                .into_iter()
                .filter(|a| a.attr("rep-type") == Some("attorney"));
            for attorney in attorneys {
                for book in attorney.find_all(&addressbook) {
                    if let Some(name) = build_name(book) {
                        parties.attorneys.push(name);
                    }
                    if let Some(org) = build_org(book) {
                        parties.attorney_organizations.push(org);
                    }
                }
            }
        }
    }

    parties
}
