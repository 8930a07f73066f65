//! Live API scenarios

#[cfg(test)]
mod tests {
    use crate::common::params;
    use crate::skip_without_env;
    use execute_packer::{
        HttpTransport, HttpTransportConfig, Packer, PackerConfig, PackerError, Params,
    };
    use futures::future::join_all;
    use serde_json::json;

    fn token() -> String {
        std::env::var("TOKEN").unwrap_or_default()
    }

    fn packer() -> (Packer<HttpTransport>, execute_packer::FlushTrigger) {
        let transport = HttpTransport::new(HttpTransportConfig::new()).unwrap();
        Packer::with_default_trigger(transport, PackerConfig::default()).unwrap()
    }

    fn with_token(mut p: Params) -> Params {
        p.insert("access_token".to_string(), json!(token()));
        p
    }

    #[tokio::test]
    #[ignore]
    async fn test_mixed_calls() {
        skip_without_env!("TOKEN");
        let (packer, _trigger) = packer();

        let resolve = packer.handle(
            "utils.resolveScreenName",
            with_token(params(json!({"screen_name": "durov"}))),
        );
        let missing = packer.handle("utils.resolveScreenName", with_token(Params::new()));
        let info = packer.handle("account.getInfo", with_token(Params::new()));

        let (resolve, missing, info) = tokio::join!(resolve, missing, info);

        assert_eq!(resolve.unwrap().response["object_id"], json!(1));
        assert!(matches!(missing, Err(PackerError::Execute(_))));
        assert!(info.is_ok());
        assert_eq!(packer.stats().batches_dispatched, 1);
    }

    #[tokio::test]
    #[ignore]
    async fn test_large_api_calls() {
        skip_without_env!("TOKEN");
        let (packer, _trigger) = packer();

        let calls = (0..500).map(|_| {
            packer.handle(
                "utils.resolveScreenName",
                with_token(params(json!({"screen_name": "durov"}))),
            )
        });

        for result in join_all(calls).await {
            assert_eq!(result.unwrap().response["object_id"], json!(1));
        }
        assert_eq!(packer.stats().batches_dispatched, 20);
    }
}
