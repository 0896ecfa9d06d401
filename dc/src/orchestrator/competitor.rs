//! Primary competitor resolution
//!
//! The user's first listed competitor wins. Without one, a short inference
//! request asks the service for a single name, and `extract_competitor_name`
//! pulls a clean name out of whatever came back.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use super::error::OrchestratorError;
use super::generator::Generator;
use crate::llm::LlmError;
use crate::prompts::{PromptInputs, RequestKind};
use crate::session::first_listed_competitor;

/// A capitalized name at the start of a line, optionally with a corporate suffix
static COMPANY_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([A-Z][A-Za-z &]+(?:Networks?|Systems?|Technologies)?)")
        .expect("company name pattern is valid")
});

/// A numbered list marker such as `1.` or `2)`
static LIST_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}[.)]\s+").expect("list number pattern is valid"));

/// The competitor a battlecard is written for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCompetitor {
    pub name: String,
    /// Came from inference rather than the user's list
    pub inferred: bool,
}

/// Pull one company name out of a free-text answer
///
/// Returns `None` when nothing usable is left. A returned name is never
/// empty, is on a single line, and starts and ends with a letter or digit.
pub fn extract_competitor_name(raw: &str) -> Option<String> {
    debug!(raw_len = raw.len(), "extract_competitor_name: called");
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(name) = COMPANY_NAME_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| clean(m.as_str()))
    {
        return Some(name);
    }

    raw.lines()
        .map(|line| line.replace(['*', ':'], ""))
        .find(|line| !line.trim().is_empty())
        .and_then(|line| clean(&line))
}

fn clean(candidate: &str) -> Option<String> {
    let collapsed = candidate.split_whitespace().collect::<Vec<_>>().join(" ");
    let unlisted = LIST_NUMBER_RE.replace(trim_symbols(&collapsed), "");
    let name = trim_symbols(&unlisted);
    (!name.is_empty()).then(|| name.to_string())
}

/// Strip bullets, brackets, quotes and punctuation from both ends
fn trim_symbols(s: &str) -> &str {
    s.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Decide which competitor the battlecards target
pub async fn resolve_primary_competitor(
    generator: &Generator,
    company: &str,
    competitors_raw: Option<&str>,
) -> Result<ResolvedCompetitor, OrchestratorError> {
    debug!(%company, ?competitors_raw, "resolve_primary_competitor: called");
    if let Some(name) = first_listed_competitor(competitors_raw) {
        return Ok(ResolvedCompetitor { name, inferred: false });
    }

    let answer = generator
        .generate(RequestKind::CompetitorInference, &PromptInputs::for_company(company))
        .await?;
    match extract_competitor_name(&answer) {
        Some(name) => {
            info!(%company, competitor = %name, "Inferred primary competitor");
            Ok(ResolvedCompetitor { name, inferred: true })
        }
        None => Err(LlmError::InvalidResponse(format!("No competitor name in inference answer: {:?}", answer)).into()),
    }
}
