use log::warn;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use serde_json::Value;

use crate::core::constants::reasons;
use crate::core::types::{LinkResult, LinkStatus};

/// One verdict record as the service sends it.
///
/// Field names vary between service versions: the link may arrive as `link`
/// or `url`, the explanation as `reason` or `message`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawVerdict {
    link: Option<String>,
    url: Option<String>,
    status: Option<String>,
    reason: Option<String>,
    message: Option<String>,
}

/// Verdicts bucketed by status under a `groups` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GroupedVerdicts {
    valid: Option<Vec<RawVerdict>>,
    invalid: Option<Vec<RawVerdict>>,
    unknown: Option<Vec<RawVerdict>>,
}

/// Shapes of a bulk check response, discriminated by which key is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceResponse {
    /// `{ "groups": { "valid": [...], "invalid": [...], "unknown": [...] } }`
    Groups(GroupedVerdicts),
    /// `[ ... ]`
    Flat(Vec<RawVerdict>),
    /// `{ "results": [ ... ] }`
    Results(Vec<RawVerdict>),
    /// Anything else, including records that fail to decode
    Unrecognized,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RawVerdict {
    fn into_result(self, group_status: Option<&LinkStatus>, missing_reason: &str) -> LinkResult {
        let link = non_empty(self.link)
            .or_else(|| non_empty(self.url))
            .unwrap_or_else(|| reasons::UNKNOWN_LINK.to_string());

        let status = match non_empty(self.status) {
            Some(raw) => LinkStatus::parse(&raw),
            None => group_status.cloned().unwrap_or(LinkStatus::Unknown),
        };

        let reason = non_empty(self.reason)
            .or_else(|| non_empty(self.message))
            .unwrap_or_else(|| missing_reason.to_string());

        LinkResult::new(link, status, Some(reason))
    }
}

impl GroupedVerdicts {
    /// Valid, then invalid, then unknown; records without a status take
    /// their group's name.
    fn flatten(self) -> Vec<LinkResult> {
        let buckets = [
            (LinkStatus::Valid, self.valid),
            (LinkStatus::Invalid, self.invalid),
            (LinkStatus::Unknown, self.unknown),
        ];

        buckets
            .into_iter()
            .flat_map(|(status, records)| {
                records
                    .unwrap_or_default()
                    .into_iter()
                    .map(move |raw| raw.into_result(Some(&status), reasons::NO_REASON))
            })
            .collect()
    }
}

impl ServiceResponse {
    /// Classify a decoded JSON body.
    pub fn from_value(value: &Value) -> Self {
        if let Some(groups) = value.get("groups").filter(|g| g.is_object()) {
            return match GroupedVerdicts::deserialize(groups) {
                Ok(grouped) => ServiceResponse::Groups(grouped),
                Err(err) => {
                    warn!("Undecodable grouped response: {err}");
                    ServiceResponse::Unrecognized
                }
            };
        }

        if value.is_array() {
            return match Vec::<RawVerdict>::deserialize(value) {
                Ok(records) => ServiceResponse::Flat(records),
                Err(err) => {
                    warn!("Undecodable verdict array: {err}");
                    ServiceResponse::Unrecognized
                }
            };
        }

        if let Some(results) = value.get("results").filter(|r| r.is_array()) {
            return match Vec::<RawVerdict>::deserialize(results) {
                Ok(records) => ServiceResponse::Results(records),
                Err(err) => {
                    warn!("Undecodable results array: {err}");
                    ServiceResponse::Unrecognized
                }
            };
        }

        warn!("Unexpected API response structure: {value}");
        ServiceResponse::Unrecognized
    }
}

/// Map every link to `unknown` with the same reason, keeping order.
pub fn unknown_for_all<S: AsRef<str>>(links: &[S], reason: &str) -> Vec<LinkResult> {
    links
        .iter()
        .map(|link| LinkResult::unknown(link.as_ref(), reason))
        .collect()
}

/// Verdicts for a request that never produced a usable response.
pub fn transport_failure<S: AsRef<str>>(links: &[S], detail: &str) -> Vec<LinkResult> {
    let reason = format!("{}: {detail}", reasons::NETWORK_ERROR);
    unknown_for_all(links, &reason)
}

/// Flatten a bulk response into one verdict per submitted link.
///
/// The result follows submission order regardless of how the service
/// grouped its answer. Submitted links the service left out come back as
/// `unknown`; extra links it returned are kept at the end.
pub fn normalize_bulk(response: ServiceResponse, submitted: &[String]) -> Vec<LinkResult> {
    let mut results = match response {
        ServiceResponse::Groups(grouped) => grouped.flatten(),
        ServiceResponse::Flat(records) | ServiceResponse::Results(records) => records
            .into_iter()
            .map(|raw| raw.into_result(None, reasons::NO_REASON))
            .collect(),
        ServiceResponse::Unrecognized => {
            return unknown_for_all(submitted, reasons::INVALID_API_RESPONSE);
        }
    };

    let returned: FxHashSet<String> = results.iter().map(|r| r.link.clone()).collect();
    let mut missing_seen = FxHashSet::default();
    for link in submitted {
        if !returned.contains(link) && missing_seen.insert(link.as_str()) {
            results.push(LinkResult::unknown(link.as_str(), reasons::MISSING_VERDICT));
        }
    }

    order_by_submission(results, submitted)
}

/// Normalize the body of a single-link check.
pub fn normalize_single(link: &str, body: &Value) -> LinkResult {
    match RawVerdict::deserialize(body) {
        Ok(raw) => {
            let status = non_empty(raw.status)
                .map(|s| LinkStatus::parse(&s))
                .unwrap_or(LinkStatus::Unknown);
            let reason = non_empty(raw.reason)
                .or_else(|| non_empty(raw.message))
                .unwrap_or_else(|| reasons::NO_DETAILS.to_string());
            LinkResult::new(link, status, Some(reason))
        }
        Err(err) => {
            warn!("Undecodable single verdict for {link}: {err}");
            LinkResult::unknown(link, reasons::INVALID_API_RESPONSE)
        }
    }
}

/// Stable sort by each link's first position in `submitted`.
fn order_by_submission(mut results: Vec<LinkResult>, submitted: &[String]) -> Vec<LinkResult> {
    let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
    for (index, link) in submitted.iter().enumerate() {
        positions.entry(link.as_str()).or_insert(index);
    }

    results.sort_by_key(|r| {
        positions
            .get(r.link.as_str())
            .copied()
            .unwrap_or(usize::MAX)
    });
    results
}
