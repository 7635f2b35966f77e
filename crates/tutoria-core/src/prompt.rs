//! Intent prompt profiles.
//!
//! One exhaustive mapping from [`Intent`] to everything that varies with it:
//! the model instruction, the input placeholder shown to the learner, and
//! the synthetic message submitted when the learner provides no text.
//! Keeping the three in a single match prevents the prompt and affordance
//! tables from drifting apart.

use tutoria_types::intent::Intent;
use tutoria_types::topic::TopicContext;

/// Everything that varies with the declared intent of a turn.
#[derive(Debug, Clone, Copy)]
pub struct IntentProfile {
    /// Intent-specific instruction block of the system prompt.
    pub instruction: &'static str,
    /// Placeholder text for the input affordance.
    pub placeholder: &'static str,
    /// Instruction submitted on the learner's behalf when their text is
    /// empty. Intents without one require non-empty learner text.
    pub synthetic_message: Option<&'static str>,
}

impl IntentProfile {
    /// The profile for an intent. Exhaustive over all variants.
    pub fn of(intent: Intent) -> Self {
        match intent {
            Intent::Question => Self {
                instruction: "Answer the learner's question directly and concretely. \
                    Ground every answer in the topic material provided with the request; \
                    when the material does not cover the question, say so before drawing \
                    on general knowledge. Prefer short worked examples over abstract \
                    explanation.",
                placeholder: "Ask a question about this topic...",
                synthetic_message: None,
            },
            Intent::Quiz => Self {
                instruction: "Do not answer questions this turn. Quiz the learner instead: \
                    ask exactly one focused question about the topic, chosen from the \
                    provided material. When the learner replies with an answer, assess it, \
                    correct any mistakes, then ask the next question.",
                placeholder: "Send to get a quiz question, or answer the last one...",
                synthetic_message: Some("Quiz me on this topic."),
            },
            Intent::Exercise => Self {
                instruction: "Produce one practice task the learner can work through on \
                    their own, based on the provided material. State the task, the \
                    expected shape of a solution, and one hint. Do not include the \
                    solution unless the learner asks for it.",
                placeholder: "Send to get a practice exercise...",
                synthetic_message: Some("Give me a practice exercise for this topic."),
            },
            Intent::DeepDive => Self {
                instruction: "Go beyond the base material: connect the topic to adjacent \
                    concepts, design trade-offs, and real-world use. Assume the learner \
                    already understands the provided material and wants depth, not a \
                    recap.",
                placeholder: "What would you like to explore in depth?",
                synthetic_message: None,
            },
        }
    }
}

/// Build the system prompt for a turn.
///
/// Composes the role framing (grounded in the topic title) with the
/// intent's instruction block. Total and side-effect-free; callers holding
/// an intent as text should go through [`Intent::from_str_lossy`] first so
/// unknown values fail closed to [`Intent::Question`].
pub fn system_prompt(intent: Intent, topic: &TopicContext) -> String {
    let profile = IntentProfile::of(intent);
    format!(
        "<role>\n\
        You are a patient tutor helping a learner study \"{}\". The request \
        includes the topic material and the conversation so far.\n\
        </role>\n\
        \n\
        <instructions>\n\
        {}\n\
        </instructions>",
        topic.title.trim(),
        profile.instruction
    )
}
