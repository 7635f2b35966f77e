//! History budgeting for model requests.
//!
//! Bounds the conversation history attached to one request by message count
//! and total character length, biased toward recency: the oldest messages
//! are dropped first.

use tutoria_types::chat::ChatMessage;
use tutoria_types::config::BudgetConfig;

/// Bounds applied to the history of a single request.
#[derive(Debug, Clone, Copy)]
pub struct HistoryBudget {
    pub max_messages: usize,
    pub max_chars: usize,
}

impl HistoryBudget {
    /// Create a budget from explicit bounds.
    pub fn new(max_messages: usize, max_chars: usize) -> Self {
        Self {
            max_messages,
            max_chars,
        }
    }

    /// Derive a budget from loaded configuration.
    pub fn from_config(config: &BudgetConfig) -> Self {
        Self::new(config.max_messages, config.max_chars)
    }
}

impl Default for HistoryBudget {
    fn default() -> Self {
        Self::from_config(&BudgetConfig::default())
    }
}

/// Bound `messages` to the given budget, keeping the most recent ones.
///
/// Walks the history from newest to oldest, keeping messages until either
/// bound would be exceeded, then re-establishes original order. When the
/// single most recent message alone exceeds `max_chars`, its content is
/// truncated from the front (oldest content) so the tail survives. Never
/// reorders; total and deterministic; empty in means empty out.
pub fn limit_history(messages: &[ChatMessage], budget: &HistoryBudget) -> Vec<ChatMessage> {
    if budget.max_messages == 0 || budget.max_chars == 0 {
        return Vec::new();
    }

    let mut kept: Vec<ChatMessage> = Vec::new();
    let mut total_chars = 0usize;

    for msg in messages.iter().rev() {
        if kept.len() == budget.max_messages {
            break;
        }
        let len = msg.content.chars().count();
        if total_chars + len > budget.max_chars {
            if kept.is_empty() {
                kept.push(ChatMessage {
                    role: msg.role,
                    content: tail_chars(&msg.content, budget.max_chars),
                });
            }
            break;
        }
        total_chars += len;
        kept.push(msg.clone());
    }

    kept.reverse();
    kept
}

/// The last `max_chars` characters of `content`, on a char boundary.
fn tail_chars(content: &str, max_chars: usize) -> String {
    let count = content.chars().count();
    if count <= max_chars {
        return content.to_string();
    }
    content.chars().skip(count - max_chars).collect()
}
