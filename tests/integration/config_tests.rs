//! Configuration resolution tests
//!
//! YAML file, then flags, then key material loaded by the components.

#[cfg(test)]
mod tests {
    use metrics_relay::MetricsError;
    use metrics_relay::agent::{Dispatcher, HttpTransport, MetricBuffer};
    use metrics_relay::config::{AgentArgs, ServerArgs};
    use metrics_relay::server::AppState;
    use metrics_relay::storage::MemoryStore;
    use rsa::RsaPrivateKey;
    use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
    use std::io::Write;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_agent_file_then_flags() {
        let file = write_temp(
            "address: collector:9000\nreport_interval: 30\nrate_limit: 4\nretry:\n  max_attempts: 5\n",
        );
        let args = AgentArgs {
            config: Some(file.path().to_path_buf()),
            rate_limit: Some(2),
            ..AgentArgs::default()
        };

        let config = args.load().await.unwrap();
        assert_eq!(config.address, "collector:9000");
        assert_eq!(config.report_interval, 30);
        assert_eq!(config.poll_interval, 2);
        assert_eq!(config.rate_limit, 2);
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.updates_url(), "http://collector:9000/updates/");
    }

    #[tokio::test]
    async fn test_server_file_then_flags() {
        let file = write_temp("address: 0.0.0.0:9000\nstorage:\n  database:\n    url: \"sqlite::memory:\"\n");
        let args = ServerArgs {
            config: Some(file.path().to_path_buf()),
            address: Some("127.0.0.1:7000".to_string()),
            ..ServerArgs::default()
        };

        let config = args.load().await.unwrap();
        assert_eq!(config.address, "127.0.0.1:7000");
        assert!(config.storage.database.is_sqlite());
        assert_eq!(config.storage.database.backoff_schedule().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_values_rejected() {
        let args = AgentArgs {
            poll_interval: Some(0),
            ..AgentArgs::default()
        };
        assert!(matches!(args.load().await, Err(MetricsError::Config(_))));

        let args = ServerArgs {
            database_dsn: Some("mysql://localhost/metrics".to_string()),
            ..ServerArgs::default()
        };
        assert!(matches!(args.load().await, Err(MetricsError::Config(_))));
    }

    #[tokio::test]
    async fn test_key_files_are_loaded() {
        let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
        let private_file = write_temp(&private_key.to_pkcs8_pem(LineEnding::LF).unwrap());
        let public_file = write_temp(
            &private_key
                .to_public_key()
                .to_public_key_pem(LineEnding::LF)
                .unwrap(),
        );

        let server_config = ServerArgs {
            crypto_key: Some(private_file.path().to_path_buf()),
            key: Some("secret".to_string()),
            ..ServerArgs::default()
        }
        .load()
        .await
        .unwrap();
        let state = AppState::from_config(&server_config, Arc::new(MemoryStore::new())).unwrap();
        assert!(state.private_key.is_some());
        assert_eq!(state.key.as_deref(), Some("secret"));

        let agent_config = AgentArgs {
            crypto_key: Some(public_file.path().to_path_buf()),
            ..AgentArgs::default()
        }
        .load()
        .await
        .unwrap();
        let transport = HttpTransport::new(agent_config.updates_url(), Duration::from_secs(1)).unwrap();
        let dispatcher = Dispatcher::from_config(
            &agent_config,
            Arc::new(MetricBuffer::new()),
            Arc::new(transport),
        )
        .unwrap();
        let report = dispatcher.prepare(&[]).unwrap();
        assert!(report.sealed);
    }

    #[tokio::test]
    async fn test_missing_key_file_fails() {
        let config = ServerArgs {
            crypto_key: Some("/nonexistent/private.pem".into()),
            ..ServerArgs::default()
        }
        .load()
        .await
        .unwrap();

        let result = AppState::from_config(&config, Arc::new(MemoryStore::new()));
        assert!(matches!(result, Err(MetricsError::Crypto(_))));
    }
}
