//! Ticket assistant actions.
//!
//! The desk talks to an [`Assistant`] for summaries and reply drafts. The
//! shipped [`MockAssistant`] fills fixed templates after a delay.

use std::time::Duration;

use async_trait::async_trait;

use crate::detail::TicketDetail;
use crate::error::Result;
use crate::utils::take_chars;

/// Characters of the description quoted in a summary.
pub const SUMMARY_EXCERPT_CHARS: usize = 100;

/// What an assistant is told about a ticket.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketContext {
    pub title: String,
    pub description: String,
    pub comments: Vec<String>,
}

impl From<&TicketDetail> for TicketContext {
    fn from(detail: &TicketDetail) -> Self {
        Self {
            title: detail.ticket.title.clone(),
            description: detail.ticket.description.clone(),
            comments: detail
                .comments
                .iter()
                .map(|c| c.comment.content.clone())
                .collect(),
        }
    }
}

#[async_trait]
pub trait Assistant: Send + Sync {
    async fn summarize(&self, context: &TicketContext) -> Result<String>;

    async fn suggest_reply(&self, context: &TicketContext) -> Result<String>;
}

/// Template-based assistant that pretends to think for `delay`.
#[derive(Debug, Clone)]
pub struct MockAssistant {
    delay: Duration,
}

impl MockAssistant {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1500);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// No delay at all.
    pub fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    async fn think(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for MockAssistant {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

pub fn summary_text(context: &TicketContext) -> String {
    format!(
        "Summary: {} - {}... {} comment(s) received. Status requires attention.",
        context.title,
        take_chars(&context.description, SUMMARY_EXCERPT_CHARS),
        context.comments.len()
    )
}

pub fn reply_text(context: &TicketContext) -> String {
    format!(
        "Thank you for contacting us regarding \"{}\". We've reviewed your issue and are \
         working on a solution. We'll keep you updated on the progress. Is there anything \
         else we can help you with?",
        context.title
    )
}

#[async_trait]
impl Assistant for MockAssistant {
    async fn summarize(&self, context: &TicketContext) -> Result<String> {
        tracing::debug!("summarizing '{}'", context.title);
        self.think().await;
        Ok(summary_text(context))
    }

    async fn suggest_reply(&self, context: &TicketContext) -> Result<String> {
        tracing::debug!("drafting reply for '{}'", context.title);
        self.think().await;
        Ok(reply_text(context))
    }
}
