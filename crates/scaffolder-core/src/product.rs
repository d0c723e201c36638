//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface a scaffolding binary implements to
//! configure the generator for its product: identity, where the SDK comes
//! from, and what to tell the user afterwards.

use crate::config::Config;
use std::path::Path;

/// Configuration trait for different CLI products
///
/// Each product implements this trait to define:
/// - Product identity (name, display name)
/// - SDK source (default endpoint and its environment override)
/// - Build tool defaults
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command and version output)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default URL of the SDK archive
    fn default_sdk_endpoint(&self) -> &'static str;

    /// Environment variable name for overriding the SDK URL
    fn sdk_endpoint_env(&self) -> &'static str;

    /// Gradle wrapper version used when none is requested
    fn default_wrapper_version(&self) -> &'static str;

    /// Name prefix of the directory the SDK archive unpacks to
    fn sdk_prefix(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path, config: &Config) -> Vec<String>;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Clone)]
    pub(crate) struct TestProduct;

    impl ProductConfig for TestProduct {
        fn name(&self) -> &'static str {
            "create-test"
        }

        fn display_name(&self) -> &'static str {
            "Test"
        }

        fn default_sdk_endpoint(&self) -> &'static str {
            "https://downloads.example.com/sdk/test-sdk-java-v1.0.0.zip?download=true"
        }

        fn sdk_endpoint_env(&self) -> &'static str {
            "SCAFFOLDER_CORE_TEST_SDK_ENDPOINT"
        }

        fn default_wrapper_version(&self) -> &'static str {
            "4.10"
        }

        fn sdk_prefix(&self) -> &'static str {
            "test-sdk"
        }

        fn next_steps(&self, dir: &Path, _config: &Config) -> Vec<String> {
            vec![format!("cd {}", dir.display())]
        }

        fn cli_description(&self) -> &'static str {
            "test product"
        }
    }

    #[test]
    fn test_user_agent_defaults_to_name() {
        assert_eq!(TestProduct.user_agent(), "create-test");
    }
}
