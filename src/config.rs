use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const DEFAULT_TOOL: &str = "pubmed-abstracts";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the PubMed client
///
/// # Example
///
/// ```
/// use pubmed_abstracts::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_api_key("your_api_key_here")
///     .with_email("researcher@university.edu");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// NCBI API key, sent with every request when set
    pub api_key: Option<String>,
    /// Contact email, recommended by NCBI usage policy
    pub email: Option<String>,
    /// Tool name reported to NCBI
    pub tool: String,
    /// Override for the E-utilities base URL (used by tests)
    pub base_url: Option<String>,
    /// HTTP request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self {
            api_key: None,
            email: None,
            tool: DEFAULT_TOOL.to_string(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The base URL requests are issued against
    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// User agent string for HTTP requests
    pub fn effective_user_agent(&self) -> String {
        format!("{}/{}", self.tool, env!("CARGO_PKG_VERSION"))
    }

    /// Identification parameters appended to every E-utilities request
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("tool".to_string(), self.tool.clone())];
        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }
        if let Some(api_key) = &self.api_key {
            params.push(("api_key".to_string(), api_key.clone()));
        }
        params
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}
