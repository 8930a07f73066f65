//! Configuration file tests

#[cfg(test)]
mod tests {
    use execute_packer::{FilterMode, PackerConfig, PackerError};
    use std::io::Write;
    use std::path::PathBuf;

    fn example_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config/packer.yaml.example")
    }

    #[tokio::test]
    async fn test_example_config_loads() {
        let config = PackerConfig::from_file(example_path()).await.unwrap();
        let settings = config.settings().unwrap();

        assert_eq!(settings.max_packed_requests, 25);
        assert_eq!(settings.filter.mode(), FilterMode::Ignore);
        assert!(!settings.filter.is_batchable("messages.send"));
        assert!(settings.filter.is_batchable("users.get"));
        assert!(settings.token_lazy_loading());
    }

    #[tokio::test]
    async fn test_config_file_with_static_tokens() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "max_packed_requests: 40\ntokens:\n  - first\n  - second\nflush_interval_ms: 500"
        )
        .unwrap();

        let config = PackerConfig::from_file(file.path()).await.unwrap();
        let settings = config.settings().unwrap();
        assert_eq!(settings.max_packed_requests, 25);
        assert!(!settings.token_lazy_loading());
        assert_eq!(settings.tokens.as_ref().map(Vec::len), Some(2));
        assert_eq!(settings.flush_interval.as_millis(), 500);
    }

    #[tokio::test]
    async fn test_malformed_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "filter:\n  mode: sometimes").unwrap();

        let err = PackerConfig::from_file(file.path()).await.unwrap_err();
        assert!(matches!(err, PackerError::Config(_)));
    }
}
