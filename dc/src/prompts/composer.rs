//! Prompt Composer
//!
//! Maps a request kind and its inputs to one completion request. Pure: it
//! reads only its arguments and never touches a session.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::embedded::PRODUCT_CONTEXT;
use super::loader::PromptLoader;
use crate::config::GenerationConfig;
use crate::llm::CompletionRequest;
use crate::session::{AdvisorVariant, normalize};

/// Errors from composing a request
#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0}")]
    Template(String),
}

/// The distinct requests the system sends to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    AccountPlan,
    CoachingTurn,
    CoachingFeedback,
    CompetitorInference,
    Battlecards,
    AnalystReport,
    Advisor(AdvisorVariant),
}

impl RequestKind {
    pub fn template_name(&self) -> &'static str {
        match self {
            Self::AccountPlan => "account-plan",
            Self::CoachingTurn => "coaching-turn",
            Self::CoachingFeedback => "coaching-feedback",
            Self::CompetitorInference => "competitor-inference",
            Self::Battlecards => "battlecards",
            Self::AnalystReport => "analyst-report",
            Self::Advisor(variant) => variant.template_name(),
        }
    }

    /// Inputs that must be present and non-blank
    fn required(&self) -> &'static [Field] {
        match self {
            Self::AccountPlan | Self::AnalystReport | Self::CompetitorInference => &[Field::Company],
            Self::CoachingTurn => &[Field::Company, Field::Message],
            Self::CoachingFeedback => &[Field::Transcript],
            Self::Battlecards => &[Field::Company, Field::PrimaryCompetitor],
            Self::Advisor(AdvisorVariant::Competitor) => {
                &[Field::Company, Field::Message, Field::Artifact, Field::PrimaryCompetitor]
            }
            Self::Advisor(_) => &[Field::Company, Field::Message, Field::Artifact],
        }
    }

    /// Name used in errors for the artifact this kind is grounded in
    fn artifact_name(&self) -> &'static str {
        match self {
            Self::Advisor(AdvisorVariant::Sales) => "accountPlan",
            Self::Advisor(AdvisorVariant::Competitor) => "battlecards",
            Self::Advisor(AdvisorVariant::Company) => "analystReport",
            _ => "artifact",
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.template_name())
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Company,
    Message,
    Transcript,
    Artifact,
    PrimaryCompetitor,
}

/// Runtime values a template may reference
///
/// Blank strings are stored as `None`, so templates only need `{{#if}}`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptInputs {
    pub company: Option<String>,
    pub contacts: Option<String>,
    pub competitors: Option<String>,
    pub primary_competitor: Option<String>,
    /// The primary competitor came from inference, not from the user
    pub competitor_inferred: bool,
    pub transcript: Option<String>,
    pub message: Option<String>,
    pub artifact: Option<String>,
}

impl PromptInputs {
    pub fn for_company(company: &str) -> Self {
        Self {
            company: normalize(Some(company)),
            ..Default::default()
        }
    }

    pub fn contacts(mut self, contacts: Option<&str>) -> Self {
        self.contacts = normalize(contacts);
        self
    }

    pub fn competitors(mut self, competitors: Option<&str>) -> Self {
        self.competitors = normalize(competitors);
        self
    }

    pub fn primary_competitor(mut self, name: Option<&str>, inferred: bool) -> Self {
        self.primary_competitor = normalize(name);
        self.competitor_inferred = inferred;
        self
    }

    pub fn transcript(mut self, transcript: Option<&str>) -> Self {
        self.transcript = normalize(transcript);
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.message = normalize(Some(message));
        self
    }

    pub fn artifact(mut self, artifact: Option<&str>) -> Self {
        self.artifact = normalize(artifact);
        self
    }

    fn has(&self, field: Field) -> bool {
        match field {
            Field::Company => self.company.is_some(),
            Field::Message => self.message.is_some(),
            Field::Transcript => self.transcript.is_some(),
            Field::Artifact => self.artifact.is_some(),
            Field::PrimaryCompetitor => self.primary_competitor.is_some(),
        }
    }
}

#[derive(Serialize)]
struct RenderContext<'a> {
    product_context: &'static str,
    #[serde(flatten)]
    inputs: &'a PromptInputs,
}

/// Builds completion requests from templates
pub struct PromptComposer {
    loader: PromptLoader,
    max_tokens: u32,
    inference_max_tokens: u32,
}

impl PromptComposer {
    pub fn new(loader: PromptLoader, generation: &GenerationConfig) -> Self {
        Self {
            loader,
            max_tokens: generation.max_tokens,
            inference_max_tokens: generation.inference_max_tokens,
        }
    }

    /// Token budget for a request kind
    pub fn max_tokens_for(&self, kind: RequestKind) -> u32 {
        match kind {
            RequestKind::CompetitorInference => self.inference_max_tokens,
            _ => self.max_tokens,
        }
    }

    /// Validate inputs and render the request
    pub fn compose(&self, kind: RequestKind, inputs: &PromptInputs) -> Result<CompletionRequest, ComposeError> {
        debug!(%kind, "compose: called");
        for field in kind.required() {
            if !inputs.has(*field) {
                let name = match field {
                    Field::Company => "company",
                    Field::Message => "message",
                    Field::Transcript => "conversation transcript",
                    Field::Artifact => kind.artifact_name(),
                    Field::PrimaryCompetitor => "primaryCompetitor",
                };
                debug!(%kind, %name, "compose: missing required input");
                return Err(ComposeError::MissingField(name));
            }
        }

        let context = RenderContext {
            product_context: PRODUCT_CONTEXT,
            inputs,
        };
        let prompt = self
            .loader
            .render(kind.template_name(), &context)
            .map_err(|e| ComposeError::Template(e.to_string()))?;

        Ok(CompletionRequest::new(prompt, self.max_tokens_for(kind)))
    }
}
