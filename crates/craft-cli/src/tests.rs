//! Service and channel tests against a scripted provider

#[cfg(test)]
mod service_tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use craft_core::{
        CompletionProvider, EnhancementRequest, Error, Mode, Result, Storage, UserSettings,
    };
    use craft_store::{FileStorage, MemoryStorage};
    use insta::assert_yaml_snapshot;

    use crate::channel::serve;
    use crate::ui::user_message;
    use crate::{EnhancementService, KeyChange, Message, ResponseBody};

    #[derive(Clone, Copy)]
    enum Reply {
        Text(&'static str),
        Unauthorized,
        RateLimited,
    }

    struct ScriptedProvider {
        reply: Reply,
        calls: Arc<AtomicUsize>,
    }

    impl ScriptedProvider {
        fn new(reply: Reply) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    reply,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl CompletionProvider for ScriptedProvider {
        async fn enhance(&self, prompt: &str, _api_key: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Reply::Text(text) => Ok(format!("{text} ({prompt})")),
                Reply::Unauthorized => Err(Error::InvalidCredential),
                Reply::RateLimited => Err(Error::RateLimited),
            }
        }

        async fn validate_key(&self, api_key: &str) -> bool {
            api_key.starts_with("gsk_")
        }

        fn model_id(&self) -> &str {
            "scripted"
        }
    }

    fn service_with(
        reply: Reply,
        storage: Arc<dyn Storage>,
    ) -> (EnhancementService<ScriptedProvider>, Arc<AtomicUsize>) {
        let (provider, calls) = ScriptedProvider::new(reply);
        (EnhancementService::new(provider, storage), calls)
    }

    #[tokio::test]
    async fn test_marker_text_is_returned_without_remote_call() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let (service, calls) = service_with(Reply::Text("Role: tutor"), storage);

        let result = service
            .enhance(EnhancementRequest::new("Background: please help", Some(Mode::Clarity)))
            .await
            .unwrap();

        assert_eq!(result.enhanced, "Background: please help");
        assert!(result.is_unchanged());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_remote_call() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let (service, calls) = service_with(Reply::Text("Role: tutor"), storage.clone());

        let err = service
            .enhance(EnhancementRequest::new("what is rust", None))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MissingCredential));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(storage.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_enhance_uses_default_mode_and_records_history() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::with_api_key("gsk_live"));
        storage
            .save_settings(&UserSettings {
                default_mode: Mode::Creative,
                ..Default::default()
            })
            .await
            .unwrap();
        let (service, calls) = service_with(Reply::Text("Role: storyteller"), storage.clone());

        let result = service
            .enhance(EnhancementRequest::new("a poem about tides", None))
            .await
            .unwrap();

        assert_eq!(result.mode, Mode::Creative);
        assert_eq!(result.enhanced, "Role: storyteller (a poem about tides)");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(storage.history().await.unwrap(), vec![result]);
    }

    #[tokio::test]
    async fn test_history_respects_settings() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::with_api_key("gsk_live"));
        let (service, _) = service_with(Reply::Text("Role: analyst"), storage.clone());

        service
            .update_settings(&UserSettings {
                max_history_items: 2,
                ..Default::default()
            })
            .await
            .unwrap();
        for draft in ["one", "two", "three"] {
            service.enhance(EnhancementRequest::new(draft, None)).await.unwrap();
        }

        let history = service.history().await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].original, "three");
        assert_eq!(history[1].original, "two");

        service
            .update_settings(&UserSettings {
                save_history: false,
                ..Default::default()
            })
            .await
            .unwrap();
        service.enhance(EnhancementRequest::new("four", None)).await.unwrap();
        assert_eq!(service.history().await.unwrap()[0].original, "three");
    }

    #[tokio::test]
    async fn test_unauthorized_is_surfaced_with_actionable_message() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::with_api_key("gsk_revoked"));
        let (service, calls) = service_with(Reply::Unauthorized, storage.clone());

        let err = service
            .enhance(EnhancementRequest::new("summarize this", None))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidCredential));
        assert_eq!(user_message(&err), "Please check your API key.");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(storage.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_key_removes_stored_key() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::with_api_key("gsk_old"));
        let (service, _) = service_with(Reply::Text("x"), storage.clone());

        assert_eq!(service.set_api_key("  gsk_new  ").await.unwrap(), KeyChange::Saved);
        assert_eq!(storage.api_key().await.unwrap().as_deref(), Some("gsk_new"));

        assert_eq!(service.set_api_key("   ").await.unwrap(), KeyChange::Removed);
        assert_eq!(storage.api_key().await.unwrap(), None);
        assert!(!service.api_key_status().await.unwrap().configured);
    }

    #[tokio::test]
    async fn test_validate_key() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let (service, _) = service_with(Reply::Text("x"), storage);

        assert!(matches!(service.validate_key().await, Err(Error::MissingCredential)));

        service.set_api_key("gsk_valid").await.unwrap();
        assert!(service.validate_key().await.unwrap());

        service.set_api_key("sk_other").await.unwrap();
        assert!(!service.validate_key().await.unwrap());
    }

    #[tokio::test]
    async fn test_get_settings_response_snapshot() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let (service, _) = service_with(Reply::Text("x"), storage);

        let response = service.handle(Message::GetSettings).await;

        assert_yaml_snapshot!(response, @r###"
        success: true
        settings:
          defaultMode: clarity
          autoEnhance: false
          showPreview: true
          saveHistory: true
          maxHistoryItems: 50
        "###);
    }

    #[tokio::test]
    async fn test_get_api_key_is_masked() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::with_api_key("gsk_abcdef123"));
        let (service, _) = service_with(Reply::Text("x"), storage);

        let response = service.handle(Message::GetApiKey).await;
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "success": true, "apiKey": "gsk_*********", "configured": true })
        );
    }

    #[tokio::test]
    async fn test_handle_line_reports_failures() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::with_api_key("gsk_live"));
        let (service, _) = service_with(Reply::RateLimited, storage);

        let response = service.handle_line(r#"{"type":"EXPORT_HISTORY"}"#).await;
        assert!(!response.success);
        assert_eq!(
            response.body,
            ResponseBody::Error {
                error: "Unknown message type: EXPORT_HISTORY".to_string()
            }
        );

        let response = service
            .handle_line(r#"{"type":"ENHANCE_PROMPT","payload":{"text":"plan a trip"}}"#)
            .await;
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "Rate limit exceeded. Please try again in a moment.");
    }

    #[tokio::test]
    async fn test_channel_answers_each_line() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::open(dir.path()).unwrap());
        let (service, calls) = service_with(Reply::Text("Role: guide"), storage);

        let input = concat!(
            r#"{"type":"SET_API_KEY","payload":"gsk_channel"}"#,
            "\n\n",
            r#"{"type":"ENHANCE_PROMPT","payload":{"text":"hike routes","mode":"detail"}}"#,
            "\n",
            "garbage\n",
            r#"{"type":"GET_HISTORY"}"#,
            "\n",
        );
        let mut output = Vec::new();

        let answered = serve(&service, input.as_bytes(), &mut output).await.unwrap();
        assert_eq!(answered, 4);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let lines: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines[0]["message"], "API key saved successfully");
        assert_eq!(lines[1]["result"]["enhanced"], "Role: guide (hike routes)");
        assert_eq!(lines[1]["result"]["mode"], "detail");
        assert_eq!(lines[2]["success"], false);
        assert_eq!(lines[3]["history"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_channel_survives_non_utf8_line() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let (service, _) = service_with(Reply::Text("x"), storage);

        let mut input = Vec::new();
        input.extend_from_slice(br#"{"type":"GET_SETTINGS"}"#);
        input.extend_from_slice(b"\n\xff\xfe bad\n");
        input.extend_from_slice(br#"{"type":"GET_HISTORY"}"#);
        input.push(b'\n');
        let mut output = Vec::new();

        let answered = serve(&service, input.as_slice(), &mut output).await.unwrap();
        assert_eq!(answered, 3);

        let lines: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(lines[0]["success"], true);
        assert_eq!(lines[1]["success"], false);
        assert!(lines[1]["error"].as_str().unwrap().starts_with("Invalid message:"));
        assert_eq!(lines[2]["success"], true);
        assert!(lines[2]["history"].as_array().unwrap().is_empty());
    }
}
