//! Common test utilities for execute-packer

pub mod remote;

pub use fixtures::{params, wait_pending};
pub use remote::{Behavior, FakeRemote, parse_script};

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}
