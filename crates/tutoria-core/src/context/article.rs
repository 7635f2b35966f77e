//! Article context block for model requests.
//!
//! Builds the fixed-shape topic block sent alongside the system prompt,
//! using XML tag boundaries so the model can distinguish the sections.
//! The full example/code catalog of a topic is deliberately excluded to
//! keep the payload bounded.

use tutoria_types::topic::TopicContext;

/// Render a topic into the article-context block.
///
/// Layout:
/// ```text
/// <topic_title>{title}</topic_title>
/// <topic_description>{description}</topic_description>
/// <key_points>- ...</key_points>
/// ```
///
/// Empty fields omit their section. Pure function of the topic's fields;
/// an all-empty topic yields an empty string.
pub fn prepare_article_context(topic: &TopicContext) -> String {
    let mut sections = Vec::with_capacity(3);

    if !topic.title.trim().is_empty() {
        sections.push(format!(
            "<topic_title>\n{}\n</topic_title>",
            topic.title.trim()
        ));
    }

    if !topic.description.trim().is_empty() {
        sections.push(format!(
            "<topic_description>\n{}\n</topic_description>",
            topic.description.trim()
        ));
    }

    if !topic.key_points.is_empty() {
        let lines: Vec<String> = topic
            .key_points
            .iter()
            .map(|point| format!("- {}", point.trim()))
            .collect();
        sections.push(format!("<key_points>\n{}\n</key_points>", lines.join("\n")));
    }

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic() -> TopicContext {
        TopicContext {
            id: "closures".to_string(),
            title: "Closures".to_string(),
            description: "Functions that capture their environment.".to_string(),
            key_points: vec![
                "Capture by reference or by value".to_string(),
                "Implement the Fn traits".to_string(),
            ],
        }
    }

    #[test]
    fn test_full_topic_renders_all_sections() {
        let block = prepare_article_context(&topic());
        assert!(block.contains("<topic_title>\nClosures\n</topic_title>"));
        assert!(block.contains("<topic_description>"));
        assert!(block.contains("- Capture by reference or by value"));
        assert!(block.contains("- Implement the Fn traits"));
    }

    #[test]
    fn test_empty_fields_omit_sections() {
        let mut t = topic();
        t.description = String::new();
        t.key_points.clear();
        let block = prepare_article_context(&t);
        assert!(block.contains("<topic_title>"));
        assert!(!block.contains("<topic_description>"));
        assert!(!block.contains("<key_points>"));
    }

    #[test]
    fn test_all_empty_topic_yields_empty_string() {
        let t = TopicContext {
            id: "x".to_string(),
            title: String::new(),
            description: String::new(),
            key_points: Vec::new(),
        };
        assert_eq!(prepare_article_context(&t), "");
    }

    #[test]
    fn test_deterministic() {
        let t = topic();
        assert_eq!(prepare_article_context(&t), prepare_article_context(&t));
    }

    #[test]
    fn test_does_not_mutate_topic() {
        let t = topic();
        let before = t.clone();
        let _ = prepare_article_context(&t);
        assert_eq!(t, before);
    }
}
