//! Snapshot tests for the Groq client

#[cfg(test)]
mod snapshot_tests {
    use crate::{GroqClient, GroqConfig};
    use insta::assert_yaml_snapshot;

    #[test]
    fn test_config_snapshot() {
        assert_yaml_snapshot!(GroqConfig::default(), {
            ".temperature" => "[temperature]",
        }, @r###"
        api_url: "https://api.groq.com/openai/v1/chat/completions"
        model: llama3-8b-8192
        temperature: "[temperature]"
        max_tokens: 1000
        timeout_secs: 60
        "###);
    }

    #[test]
    fn test_generation_config_follows_groq_config() {
        let config = GroqConfig {
            model: GroqClient::LLAMA3_70B.to_string(),
            max_tokens: 256,
            timeout_secs: 5,
            ..Default::default()
        };

        let generation = config.generation();
        assert_eq!(generation.model_id, "llama3-70b-8192");
        assert_eq!(generation.max_tokens, 256);
        assert_eq!(generation.temperature, Some(0.3));
        assert_eq!(generation.timeout.as_secs(), 5);
    }

    #[test]
    fn test_model_constants() {
        assert_yaml_snapshot!(GroqClient::LLAMA3_8B, @"llama3-8b-8192");
        assert_yaml_snapshot!(GroqClient::LLAMA3_70B, @"llama3-70b-8192");
    }
}
