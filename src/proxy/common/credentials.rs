// Credential adapter
// Derives the Authorization values to try against the upstream, in order

const BEARER_PREFIX: &str = "Bearer ";

/// Candidate `Authorization` values for one inbound header.
///
/// - empty / absent header: no candidates
/// - `Bearer T`: `["Bearer T", "T"]`
/// - `T`: `["Bearer T", "T"]`
///
/// Identical or empty candidates are dropped, so at most two are returned.
pub fn derive_candidates(raw: Option<&str>) -> Vec<String> {
    let raw = match raw {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Vec::new(),
    };

    let (primary, secondary) = match raw.strip_prefix(BEARER_PREFIX) {
        Some(token) => (raw.to_string(), token.to_string()),
        None => (format!("{}{}", BEARER_PREFIX, raw), raw.to_string()),
    };

    let mut candidates = Vec::with_capacity(2);
    for candidate in [primary, secondary] {
        if !candidate.is_empty() && !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}
