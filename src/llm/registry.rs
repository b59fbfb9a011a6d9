//! Provider registry for managing LLM provider instances.

use std::collections::HashMap;
use std::sync::Arc;

use reqwest::Client;
use tracing::{info, warn};

use super::gemini::GeminiProvider;
use super::openai::OpenAIProvider;
use super::provider::{LLMProvider, Provider};
use crate::config::ProvidersConfig;

/// Registry of LLM providers, keyed by provider type.
///
/// Built once at startup; credentials are read from the environment and
/// injected into the provider instances here, so everything downstream is
/// testable with fakes.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<Provider, Arc<dyn LLMProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize providers from environment credentials and configuration.
    ///
    /// A provider without a credential is simply not registered; requests
    /// selecting it are rejected at dispatch time.
    pub fn from_env(config: &ProvidersConfig) -> Self {
        let mut registry = Self::new();
        let client = Client::new();

        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            let provider = GeminiProvider::new(
                client.clone(),
                api_key,
                config.gemini.base_url.clone(),
                config.gemini.model.clone(),
                config.gemini.image_model.clone(),
            );
            registry.register(Provider::Gemini, Arc::new(provider));
            info!("Registered Gemini provider");
        }

        if let Ok(api_key) = std::env::var("OPENAI_API_KEY") {
            let provider = OpenAIProvider::new(
                client.clone(),
                api_key,
                config.openai.base_url.clone(),
                config.openai.model.clone(),
                config.openai.image_size.clone(),
            );
            registry.register(Provider::OpenAI, Arc::new(provider));
            info!("Registered OpenAI provider");
        }

        if registry.get(&Provider::Gemini).is_none() && registry.get(&Provider::OpenAI).is_none() {
            warn!("No LLM providers configured. Set GEMINI_API_KEY or OPENAI_API_KEY.");
        }

        registry
    }

    /// Register a provider implementation.
    pub fn register(&mut self, provider: Provider, implementation: Arc<dyn LLMProvider>) {
        self.providers.insert(provider, implementation);
    }

    /// Get a provider by type.
    pub fn get(&self, provider: &Provider) -> Option<Arc<dyn LLMProvider>> {
        self.providers.get(provider).cloned()
    }
}
