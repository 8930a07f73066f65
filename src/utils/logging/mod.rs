//! Logging utilities
//!
//! The crate logs through `tracing`; binaries install a subscriber with
//! [`init_tracing`]. Credentials never appear in logs unmasked.

use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber
///
/// `RUST_LOG` wins when set; otherwise `debug` selects between `debug` and
/// `info` for this crate. Calling it twice is a no-op.
pub fn init_tracing(debug: bool, json: bool) {
    let default_directive = if debug {
        "execute_packer=debug,info"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// Mask a token for logging, keeping a short prefix and suffix
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..2].iter().collect();
        let tail: String = chars[chars.len() - 2..].iter().collect();
        format!("{}***{}", head, tail)
    } else {
        "***".to_string()
    }
}
