// ABOUTME: ModelRouter - resolves a declared "provider:model" string to a client and model id.
// ABOUTME: Unknown providers and unrecognized values fall back to the default provider.

use std::collections::HashMap;
use std::sync::Arc;

use super::LlmClient;

/// Value a subagent document may use to explicitly ask for the parent's model.
pub const INHERIT_MODEL: &str = "inherit";

/// A registered model provider.
#[derive(Clone)]
pub struct Provider {
    client: Arc<dyn LlmClient>,
    default_model: String,
    aliases: HashMap<String, String>,
}

impl Provider {
    /// Create a provider with the model used when no model is named.
    pub fn new(client: Arc<dyn LlmClient>, default_model: impl Into<String>) -> Self {
        Self {
            client,
            default_model: default_model.into(),
            aliases: HashMap::new(),
        }
    }

    /// Map a short alias (e.g. a tier name like "haiku") to a canonical model id.
    pub fn alias(mut self, alias: impl Into<String>, model: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), model.into());
        self
    }

    /// The provider's default model id.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    fn canonical(&self, model: &str) -> String {
        if model.is_empty() {
            return self.default_model.clone();
        }
        self.aliases
            .get(model)
            .cloned()
            .unwrap_or_else(|| model.to_string())
    }
}

/// The outcome of routing: which provider, which model id, and the client to call.
#[derive(Clone)]
pub struct Route {
    pub provider: String,
    pub model: String,
    pub client: Arc<dyn LlmClient>,
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

/// Routes declared model strings to registered providers.
///
/// Accepted forms:
/// - `provider:model` - the named provider; `model` may be an alias or empty
/// - `provider` - the named provider's default model
/// - `alias` - an alias of the default provider
/// - `inherit` or nothing - the default provider and model
///
/// Anything else falls back to the default provider and its default model.
#[derive(Clone)]
pub struct ModelRouter {
    default_provider: String,
    providers: HashMap<String, Provider>,
}

impl ModelRouter {
    /// Create a router whose default provider is `name`.
    pub fn new(name: impl Into<String>, provider: Provider) -> Self {
        let name = name.into();
        let mut providers = HashMap::new();
        providers.insert(name.clone(), provider);
        Self {
            default_provider: name,
            providers,
        }
    }

    /// Register an additional provider.
    pub fn provider(mut self, name: impl Into<String>, provider: Provider) -> Self {
        self.providers.insert(name.into(), provider);
        self
    }

    /// Name of the default provider.
    pub fn default_provider(&self) -> &str {
        &self.default_provider
    }

    /// Whether a provider is registered under `name`.
    pub fn has_provider(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Resolve a declared model string.
    pub fn route(&self, declared: Option<&str>) -> Route {
        let Some(spec) = declared.map(str::trim).filter(|s| !s.is_empty()) else {
            return self.default_route();
        };
        if spec == INHERIT_MODEL {
            return self.default_route();
        }

        match spec.split_once(':') {
            Some((name, model)) => match self.providers.get(name.trim()) {
                Some(provider) => Self::route_to(name.trim(), provider, model.trim()),
                None => {
                    tracing::debug!(
                        provider = name.trim(),
                        "unknown model provider, using default"
                    );
                    self.default_route()
                }
            },
            None => {
                if let Some(provider) = self.providers.get(spec) {
                    return Self::route_to(spec, provider, "");
                }
                let default = self.default();
                if default.aliases.contains_key(spec) {
                    return Self::route_to(&self.default_provider, default, spec);
                }
                tracing::debug!(model = spec, "unrecognized model, using default");
                self.default_route()
            }
        }
    }

    fn default(&self) -> &Provider {
        // The constructor guarantees the default provider is registered and
        // `provider()` can only add or replace entries.
        &self.providers[&self.default_provider]
    }

    fn default_route(&self) -> Route {
        Self::route_to(&self.default_provider, self.default(), "")
    }

    fn route_to(name: &str, provider: &Provider, model: &str) -> Route {
        Route {
            provider: name.to_string(),
            model: provider.canonical(model),
            client: provider.client.clone(),
        }
    }
}
