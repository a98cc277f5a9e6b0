use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: SecretString,
    pub gemini_api_base: String,
    pub gemini_model: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub default_question_count: usize,
    pub max_question_count: usize,
    pub seconds_per_question: u64,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: SecretString::from(
                env::var("GEMINI_API_KEY").unwrap_or_else(|_| "dev_gemini_api_key".to_string()),
            ),
            gemini_api_base: env::var("GEMINI_API_BASE")
                .unwrap_or_else(|_| "https://generativelanguage.googleapis.com".to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            default_question_count: env::var("DEFAULT_QUESTION_COUNT")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(5),
            max_question_count: env::var("MAX_QUESTION_COUNT")
                .ok()
                .and_then(|n| n.parse().ok())
                .unwrap_or(10),
            seconds_per_question: env::var("SECONDS_PER_QUESTION")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(120),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.gemini_api_key.expose_secret() == "dev_gemini_api_key" {
            panic!(
                "FATAL: GEMINI_API_KEY is using default value! Set GEMINI_API_KEY environment variable."
            );
        }
    }

    pub fn test_config() -> Self {
        Self {
            gemini_api_key: SecretString::from("test_gemini_api_key".to_string()),
            gemini_api_base: "http://localhost:9090".to_string(),
            gemini_model: "gemini-2.5-flash".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            default_question_count: 5,
            max_question_count: 10,
            seconds_per_question: 30,
            request_timeout_secs: 5,
        }
    }
}
