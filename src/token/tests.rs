// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod token_tests {
    use crate::common::Error;
    use crate::provider::ProviderType;
    use crate::token::{
        token, EmailNormalizer, IdentifierNormalizer, SendVerificationRequestParams, Theme,
        TokenConfig, TokenSection, TokenUserConfig, VerificationSender, DEFAULT_MAX_AGE,
    };
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use reqwest::Url;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl VerificationSender<TokenConfig> for RecordingSender {
        async fn send_verification_request(
            &self,
            params: SendVerificationRequestParams<'_, TokenConfig>,
        ) -> Result<(), Error> {
            self.sent.lock().unwrap().push((
                params.identifier.to_string(),
                params.token.to_string(),
                params.provider.id().to_string(),
            ));
            Ok(())
        }
    }

    fn url() -> Url {
        Url::parse("https://example.com/api/auth/callback/token?token=abc").unwrap()
    }

    #[test]
    fn defaults() {
        let config = token(TokenUserConfig::new());
        println!("Testing {config:?}");
        assert_eq!(config.id(), "token");
        assert_eq!(config.name(), "Token");
        assert_eq!(config.provider_type(), ProviderType::Token);
        assert_eq!(config.settings().max_age(), DEFAULT_MAX_AGE);
        assert_eq!(config.settings().max_age(), 86400);
        assert_eq!(config.settings().secret(), None);

        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            config.settings().expires_at(now),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn overrides() {
        let config = token(
            TokenUserConfig::new()
                .with_id("sms")
                .with_max_age(600)
                .with_secret("hunter2"),
        );
        assert_eq!(config.id(), "sms");
        assert_eq!(config.name(), "Token");
        assert_eq!(config.settings().max_age(), 600);
        assert_eq!(config.settings().secret(), Some("hunter2"));
        assert!(!format!("{config:?}").contains("hunter2"));

        let section: TokenSection = toml::from_str("name = \"Text message\"\nmax_age = 300").unwrap();
        let config = token(section.into());
        assert_eq!(config.name(), "Text message");
        assert_eq!(config.settings().max_age(), 300);
    }

    #[tokio::test]
    async fn unimplemented_sender() {
        let config = token(TokenUserConfig::new());
        let result = config
            .send_verification_request("+15550100", &url(), Utc::now(), "abc", &Theme::default())
            .await;
        match result {
            Err(Error::Unimplemented(message)) => assert!(message.starts_with("Not implemented")),
            other => panic!("expected unimplemented, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn custom_sender() {
        let sender = Arc::new(RecordingSender::default());
        let config = token(TokenUserConfig::<TokenConfig>::new().with_sender(sender.clone()));
        config
            .send_verification_request("+15550100", &url(), Utc::now(), "abc", &Theme::default())
            .await
            .unwrap();
        assert_eq!(
            *sender.sent.lock().unwrap(),
            vec![(
                "+15550100".to_string(),
                "abc".to_string(),
                "token".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn token_generator() {
        let config = token(TokenUserConfig::new());
        assert_eq!(config.settings().generate_verification_token().await, Ok(None));

        let config = token(
            TokenUserConfig::new().with_token_generator(Arc::new(|| "ABC123".to_string())),
        );
        assert_eq!(
            config.settings().generate_verification_token().await,
            Ok(Some("ABC123".to_string()))
        );
    }

    #[test]
    fn email_normalizer() {
        let normalizer = EmailNormalizer;
        assert_eq!(
            normalizer.normalize(" Foo@Example.com,ignored ").unwrap(),
            "foo@example.com"
        );
        assert_eq!(
            normalizer.normalize("a,b@c.com,d.com").unwrap(),
            "a,b@c.com"
        );
        assert_eq!(normalizer.normalize("a@b.com@c.com").unwrap(), "a@b.com");
        assert_eq!(
            normalizer.normalize(""),
            Err(Error::Identifier("Missing email from request body.".to_string()))
        );
        assert!(matches!(
            normalizer.normalize("no-at-sign"),
            Err(Error::Identifier(_))
        ));
    }

    #[test]
    fn token_normalizer() {
        let config = token(TokenUserConfig::new());
        assert_eq!(config.normalize_identifier(Some(" +1 555 ")).unwrap(), " +1 555 ");
        assert!(matches!(
            config.normalize_identifier(None),
            Err(Error::Identifier(_))
        ));
        assert!(matches!(
            config.normalize_identifier(Some("")),
            Err(Error::Identifier(_))
        ));

        let digits = |identifier: &str| -> Result<String, Error> {
            Ok(identifier.chars().filter(char::is_ascii_digit).collect())
        };
        let config = token(TokenUserConfig::new().with_normalizer(Arc::new(digits)));
        assert_eq!(config.normalize_identifier(Some(" +1 555 ")).unwrap(), "1555");
    }
}
