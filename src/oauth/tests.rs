// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[cfg(test)]
mod oauth_tests {
    use crate::common::{Error, NormalizedIdentity};
    use crate::oauth::{
        discord, freshbooks, google, wechat, AuthorizationEndpoint, CallbackChecks,
        CallbackExtras, OAuthClient, OAuthConfig, OAuthSection, OAuthUserConfig, Params,
        ProviderStyle, TokenSet, UserinfoOptions, Url,
    };
    use crate::provider::ProviderType;
    use async_trait::async_trait;
    use oauth2::AccessToken;
    use reqwest::Method;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// Stands in for the engine's client, recording what it was asked to do.
    #[derive(Default)]
    struct StubClient {
        exchange_bodies: Mutex<Vec<Params>>,
        userinfo_calls: Mutex<Vec<(String, Params, Method)>>,
    }

    #[async_trait]
    impl OAuthClient for StubClient {
        async fn oauth_callback(
            &self,
            _callback_url: &Url,
            params: &Params,
            _checks: &CallbackChecks,
            extras: CallbackExtras,
        ) -> Result<TokenSet, Error> {
            self.exchange_bodies
                .lock()
                .unwrap()
                .push(extras.exchange_body);
            let mut tokens = TokenSet::new("at-1");
            if let Some(code) = params.get("code") {
                tokens
                    .extra
                    .insert("openid".to_string(), Value::String(format!("open-{code}")));
            }
            Ok(tokens)
        }

        async fn userinfo(
            &self,
            access_token: &AccessToken,
            options: UserinfoOptions,
        ) -> Result<Value, Error> {
            self.userinfo_calls.lock().unwrap().push((
                access_token.secret().clone(),
                options.params,
                options.method,
            ));
            Ok(json!({"openid": "o-1", "nickname": "Wei"}))
        }
    }

    fn options() -> OAuthUserConfig {
        OAuthUserConfig::new("cid", "csecret")
    }

    fn callback_url() -> Url {
        Url::parse("https://example.com/api/auth/callback/wechat").unwrap()
    }

    #[test]
    fn factory_tests() {
        let cases: [(OAuthConfig, &str, &str, &str, &str); 4] = [
            (
                wechat(options()),
                "wechat",
                wechat::AUTHORIZATION_URL,
                wechat::TOKEN_URL,
                wechat::USERINFO_URL,
            ),
            (
                freshbooks(options()),
                "freshbooks",
                freshbooks::AUTHORIZATION_URL,
                freshbooks::TOKEN_URL,
                freshbooks::USERINFO_URL,
            ),
            (
                discord(options()),
                "discord",
                discord::AUTHORIZATION_URL,
                discord::TOKEN_URL,
                discord::USERINFO_URL,
            ),
            (
                google(options()),
                "google",
                google::AUTHORIZATION_URL,
                google::TOKEN_URL,
                google::USERINFO_URL,
            ),
        ];
        for (config, id, authorization, token, userinfo) in cases {
            println!("Testing {config:?}");
            assert_eq!(config.id(), id);
            assert_eq!(config.provider_type(), ProviderType::OAuth);
            assert_eq!(config.client_id().as_str(), "cid");
            assert_eq!(config.client_secret().secret(), "csecret");
            assert_eq!(config.authorization().url(), authorization);
            assert_eq!(config.token().url(), token);
            assert_eq!(config.userinfo().url(), userinfo);
        }
    }

    #[test]
    fn wechat_defaults() {
        let config = wechat(options());
        assert_eq!(config.name(), "Wechat");
        assert_eq!(config.authorization().param("appid"), Some("cid"));
        assert_eq!(config.authorization().param("scope"), Some("snsapi_base"));
        assert_eq!(config.token().param("appid"), Some("cid"));
        assert_eq!(config.token().param("secret"), Some("csecret"));
        assert_eq!(
            config.token().param("grant_type"),
            Some("authorization_code")
        );
        assert!(config.token().request().is_some());
        assert_eq!(config.userinfo().param("lang"), Some("zh_CN"));
        assert!(config.userinfo().request().is_some());

        // The secret never shows up in debug output.
        assert!(!format!("{config:?}").contains("csecret"));
    }

    #[test]
    fn override_tests() {
        let config = wechat(
            options()
                .with_authorization("https://proxy.example.com/authorize")
                .with_name("WeChat (CN)"),
        );
        assert_eq!(
            config.authorization().url(),
            "https://proxy.example.com/authorize"
        );
        // A bare URL override replaces the descriptor, parameters included.
        assert_eq!(config.authorization().param("appid"), None);
        assert_eq!(config.name(), "WeChat (CN)");
        assert_eq!(config.id(), "wechat");
        assert_eq!(config.token().url(), wechat::TOKEN_URL);
        assert_eq!(config.token().param("secret"), Some("csecret"));
        assert!(config.userinfo().request().is_some());

        let config = discord(
            options()
                .with_id("discord-staging")
                .with_style(ProviderStyle::new("/staging.svg", "#000", "#fff")),
        );
        assert_eq!(config.id(), "discord-staging");
        assert_eq!(config.style().logo.as_deref(), Some("/staging.svg"));
        assert_eq!(config.style().logo_dark, None);
        assert_eq!(config.authorization().url(), discord::AUTHORIZATION_URL);
    }

    #[test]
    fn section_tests() {
        let section: OAuthSection = toml::from_str(
            r#"
            client_id = "cid"
            client_secret = "csecret"
            name = "Books"
            token = "https://token.example.com"
            "#,
        )
        .unwrap();
        let config = freshbooks(section.into());
        assert_eq!(config.name(), "Books");
        assert_eq!(config.token().url(), "https://token.example.com");
        assert_eq!(config.userinfo().url(), freshbooks::USERINFO_URL);
    }

    #[test]
    fn to_url_tests() {
        let url = wechat(options()).authorization().to_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://open.weixin.qq.com/connect/oauth2/authorize?appid=cid&scope=snsapi_base"
        );

        let url = google(options()).authorization().to_url().unwrap();
        assert_eq!(
            url.query_pairs().find(|(k, _)| k == "scope").unwrap().1,
            "openid email profile"
        );

        let url = discord(options()).userinfo().to_url().unwrap();
        assert_eq!(url.as_str(), discord::USERINFO_URL);

        let bad = AuthorizationEndpoint::from("not a url");
        assert!(matches!(bad.to_url(), Err(Error::Configuration(_))));
    }

    #[tokio::test]
    async fn wechat_requests() {
        let config = wechat(options());
        let client = StubClient::default();
        let mut params = Params::new();
        params.insert("code".to_string(), "c0de".to_string());
        params.insert("state".to_string(), "s".to_string());

        let tokens = config
            .exchange_tokens(&client, &callback_url(), &params, &CallbackChecks::default())
            .await
            .unwrap();
        {
            let bodies = client.exchange_bodies.lock().unwrap();
            assert_eq!(bodies.len(), 1);
            let body = &bodies[0];
            assert_eq!(body.get("code").map(String::as_str), Some("c0de"));
            assert_eq!(body.get("appid").map(String::as_str), Some("cid"));
            assert_eq!(body.get("secret").map(String::as_str), Some("csecret"));
            assert_eq!(
                body.get("grant_type").map(String::as_str),
                Some("authorization_code")
            );
        }

        let profile = config.fetch_userinfo(&client, &tokens).await.unwrap();
        {
            let calls = client.userinfo_calls.lock().unwrap();
            let (access_token, params, method) = &calls[0];
            assert_eq!(access_token, "at-1");
            assert_eq!(*method, Method::GET);
            assert_eq!(params.get("access_token").map(String::as_str), Some("at-1"));
            assert_eq!(params.get("openid").map(String::as_str), Some("open-c0de"));
            assert_eq!(params.get("lang").map(String::as_str), Some("zh_CN"));
        }

        let identity = config.map_profile(profile, &tokens).await.unwrap();
        assert_eq!(identity.id, "o-1");
        assert_eq!(identity.name.as_deref(), Some("Wei"));
        assert_eq!(identity.email, None);
        assert_eq!(identity.image, None);
    }

    #[tokio::test]
    async fn wechat_missing_openid() {
        let config = wechat(options());
        let client = StubClient::default();
        let tokens = TokenSet::new("at-1");
        let result = config.fetch_userinfo(&client, &tokens).await;
        assert!(matches!(result, Err(Error::Profile(_))));
        assert!(client.userinfo_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn default_requests() {
        let config = google(options());
        let client = StubClient::default();
        let tokens = config
            .exchange_tokens(&client, &callback_url(), &Params::new(), &CallbackChecks::default())
            .await
            .unwrap();
        assert!(client.exchange_bodies.lock().unwrap()[0].is_empty());

        config.fetch_userinfo(&client, &tokens).await.unwrap();
        let calls = client.userinfo_calls.lock().unwrap();
        assert_eq!(calls[0].0, "at-1");
        assert!(calls[0].1.is_empty());
    }

    #[tokio::test]
    async fn profile_tests() {
        let tokens = TokenSet::new("at");

        let identity = freshbooks(options())
            .map_profile(
                json!({"response": {"id": 123, "first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com"}}),
                &tokens,
            )
            .await
            .unwrap();
        assert_eq!(identity.id, "123");
        assert_eq!(identity.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(identity.email.as_deref(), Some("ada@example.com"));
        assert_eq!(identity.image, None);

        let identity = freshbooks(options())
            .map_profile(
                json!({"response": {"id": "77", "first_name": "", "last_name": "Lovelace"}}),
                &tokens,
            )
            .await
            .unwrap();
        assert_eq!(identity.name.as_deref(), Some("Lovelace"));
        assert_eq!(identity.email, None);

        let identity = freshbooks(options())
            .map_profile(json!({"response": {"id": 5}}), &tokens)
            .await
            .unwrap();
        assert_eq!(identity.name, None);

        let identity = discord(options())
            .map_profile(
                json!({"id": "80351110224678912", "username": "nelly", "discriminator": "1337", "avatar": "a_8342729096ea3675442027381ff50dfe"}),
                &tokens,
            )
            .await
            .unwrap();
        assert_eq!(identity.name.as_deref(), Some("nelly"));
        assert_eq!(
            identity.image.as_deref(),
            Some("https://cdn.discordapp.com/avatars/80351110224678912/a_8342729096ea3675442027381ff50dfe.gif")
        );
        assert_eq!(identity.email, None);

        let identity = discord(options())
            .map_profile(
                json!({"id": "80351110224678912", "username": "nelly", "global_name": "Nelly", "discriminator": "0"}),
                &tokens,
            )
            .await
            .unwrap();
        assert_eq!(identity.name.as_deref(), Some("Nelly"));
        // (80351110224678912 >> 22) % 6 == 5
        assert_eq!(
            identity.image.as_deref(),
            Some("https://cdn.discordapp.com/embed/avatars/5.png")
        );

        let identity = google(options())
            .map_profile(
                json!({"id": "g1", "email": "a@gmail.com", "name": "A", "picture": "https://p"}),
                &tokens,
            )
            .await
            .unwrap();
        assert_eq!(identity.image.as_deref(), Some("https://p"));

        let serialized = serde_json::to_value(NormalizedIdentity::new("x")).unwrap();
        assert_eq!(
            serialized,
            json!({"id": "x", "name": null, "email": null, "image": null})
        );
    }

    #[tokio::test]
    async fn profile_errors() {
        let tokens = TokenSet::new("at");
        let result = wechat(options())
            .map_profile(json!({"nickname": "no openid"}), &tokens)
            .await;
        assert!(matches!(result, Err(Error::Profile(_))));

        let empty_id =
            |_: Value, _: &TokenSet| -> Result<NormalizedIdentity, Error> { Ok(NormalizedIdentity::new("")) };
        let result = google(options().with_profile(Arc::new(empty_id)))
            .map_profile(json!({}), &tokens)
            .await;
        assert!(matches!(result, Err(Error::Profile(_))));

        let custom = |profile: Value, tokens: &TokenSet| -> Result<NormalizedIdentity, Error> {
            let mut identity = NormalizedIdentity::new(tokens.access_token.secret().clone());
            identity.name = profile["n"].as_str().map(str::to_string);
            Ok(identity)
        };
        let identity = google(options().with_profile(Arc::new(custom)))
            .map_profile(json!({"n": "Custom"}), &tokens)
            .await
            .unwrap();
        assert_eq!(identity.id, "at");
        assert_eq!(identity.name.as_deref(), Some("Custom"));
    }
}
