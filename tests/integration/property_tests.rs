//! Property tests for batch ordering
//!
//! For any batch size and any mix of per-call outcomes, call `i` of a batch
//! is encoded `i`-th and receives slot `i`.

#[cfg(test)]
mod tests {
    use crate::common::{FakeRemote, params, wait_pending};
    use execute_packer::{Packer, PackerConfig, PackerError};
    use proptest::prelude::*;
    use serde_json::json;
    use std::sync::Arc;

    async fn run_batch(outcomes: Vec<bool>) -> Result<(), TestCaseError> {
        let size = outcomes.len();
        let remote = Arc::new(FakeRemote::echo());
        let config = PackerConfig::new()
            .with_max_packed_requests(size)
            .with_tokens(["t"]);
        let packer = Packer::new(remote.clone(), config)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut handles = Vec::with_capacity(size);
        for (i, ok) in outcomes.iter().enumerate() {
            let p = if *ok {
                params(json!({"i": i}))
            } else {
                params(json!({"i": i, "fail": 113}))
            };
            let method = format!("m.call{}", i);
            let packer_clone = packer.clone();
            handles.push(tokio::spawn(async move {
                packer_clone.handle(&method, p).await
            }));
            if i + 1 < size {
                wait_pending(&packer, i + 1).await;
            }
        }

        for (i, (handle, ok)) in handles.into_iter().zip(&outcomes).enumerate() {
            let result = handle
                .await
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            if *ok {
                let resp = result.map_err(|e| TestCaseError::fail(e.to_string()))?;
                prop_assert_eq!(&resp.response["method"], &json!(format!("m.call{}", i)));
                prop_assert_eq!(&resp.response["params"]["i"], &json!(i));
            } else {
                match result {
                    Err(PackerError::Execute(err)) => {
                        prop_assert_eq!(err.method, format!("m.call{}", i));
                        prop_assert_eq!(err.error_code, 113);
                    }
                    other => prop_assert!(false, "call {} expected failure, got {:?}", i, other),
                }
            }
        }

        let scripts = remote.scripts();
        prop_assert_eq!(scripts.len(), 1);
        let encoded: Vec<String> = scripts[0].iter().map(|(m, _)| m.clone()).collect();
        let expected: Vec<String> = (0..size).map(|i| format!("m.call{}", i)).collect();
        prop_assert_eq!(encoded, expected);
        Ok(())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_admission_order_is_result_order(
            outcomes in prop::collection::vec(any::<bool>(), 1..=25)
        ) {
            let rt = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(run_batch(outcomes))?;
        }
    }
}
