//! Prompt templates and the composer that renders them

mod composer;
mod embedded;
mod loader;

pub use composer::{ComposeError, PromptComposer, PromptInputs, RequestKind};
pub use embedded::{TEMPLATE_NAMES, get_embedded};
pub use loader::{PromptLoader, TemplateSource};
