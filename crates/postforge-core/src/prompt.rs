//! Prompt enrichment

use postforge_api::{Platform, Tone};

/// Instruction prepended for a target platform
pub fn platform_instruction(platform: Platform) -> &'static str {
    match platform {
        Platform::Twitter => {
            "Create a concise, engaging tweet (max 280 characters). Use emojis strategically."
        }
        Platform::LinkedIn => {
            "Write a professional post suitable for LinkedIn. Focus on value and insights."
        }
        Platform::Instagram => {
            "Create an engaging caption perfect for Instagram. Use relevant hashtags."
        }
        Platform::Facebook => {
            "Write a friendly, shareable Facebook post that encourages engagement."
        }
        Platform::General => "Create engaging social media content.",
    }
}

/// Instruction for a tone; empty when no tone is selected
pub fn tone_instruction(tone: Option<Tone>) -> &'static str {
    match tone {
        Some(Tone::Professional) => "Use a professional, polished tone.",
        Some(Tone::Casual) => "Write in a casual, conversational style.",
        Some(Tone::Enthusiastic) => "Be energetic and enthusiastic!",
        Some(Tone::Formal) => "Maintain a formal, authoritative tone.",
        Some(Tone::Funny) => "Make it humorous and entertaining.",
        Some(Tone::Inspirational) => "Be motivational and uplifting.",
        None => "",
    }
}

/// Wrap a topic with platform and tone instructions and a generation cue
pub fn build_prompt(topic: &str, platform: Platform, tone: Option<Tone>) -> String {
    format!(
        "{} {}\n\nTopic: {}\n\nGenerate the content now:",
        platform_instruction(platform),
        tone_instruction(tone),
        topic
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone_options() -> Vec<Option<Tone>> {
        std::iter::once(None)
            .chain(Tone::ALL.into_iter().map(Some))
            .collect()
    }

    #[test]
    fn exact_layout() {
        let prompt = build_prompt("Rust 2024 edition", Platform::Twitter, Some(Tone::Funny));
        assert_eq!(
            prompt,
            "Create a concise, engaging tweet (max 280 characters). Use emojis strategically. \
             Make it humorous and entertaining.\n\nTopic: Rust 2024 edition\n\nGenerate the content now:"
        );
    }

    #[test]
    fn no_tone_keeps_separator() {
        let prompt = build_prompt("x", Platform::General, None);
        assert!(prompt.starts_with("Create engaging social media content. \n\nTopic: x"));
    }

    #[test]
    fn one_platform_instruction_then_tone_then_topic() {
        let topic = "a topic nobody else mentions";

        for platform in Platform::ALL {
            for tone in tone_options() {
                let prompt = build_prompt(topic, platform, tone);

                let platform_hits = Platform::ALL
                    .iter()
                    .map(|p| prompt.matches(platform_instruction(*p)).count())
                    .sum::<usize>();
                assert_eq!(platform_hits, 1, "{platform:?}/{tone:?}");

                let tone_hits = Tone::ALL
                    .iter()
                    .map(|t| prompt.matches(tone_instruction(Some(*t))).count())
                    .sum::<usize>();
                assert!(tone_hits <= 1, "{platform:?}/{tone:?}");

                let platform_at = prompt.find(platform_instruction(platform)).unwrap();
                let topic_at = prompt.find(&format!("Topic: {topic}")).unwrap();
                assert!(platform_at < topic_at);

                if tone.is_some() {
                    let tone_at = prompt.find(tone_instruction(tone)).unwrap();
                    assert!(platform_at < tone_at && tone_at < topic_at);
                }
                assert!(prompt.ends_with("Generate the content now:"));
            }
        }
    }

    #[test]
    fn unknown_labels_use_defaults() {
        let prompt = build_prompt(
            "t",
            Platform::from_label("Mastodon"),
            Tone::from_label("Grumpy"),
        );
        assert_eq!(prompt, build_prompt("t", Platform::General, None));
    }
}
