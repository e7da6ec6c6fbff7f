use serde::{Deserialize, Serialize};

/// Top-level frontend configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PharmacyConfig {
    pub chat: ChatConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Empty when no credential was supplied at build time.
    pub api_key: String,
    pub model: String,
    pub api_base: Option<String>,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub system_instruction: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-2.5-flash".to_string(),
            api_base: None,
            temperature: 0.7,
            max_output_tokens: 1024,
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        }
    }
}

impl ChatConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    /// Build a config from an optional credential, e.g. `option_env!("API_KEY")`.
    pub fn with_api_key(api_key: Option<&str>) -> Self {
        Self {
            api_key: api_key.unwrap_or_default().trim().to_string(),
            ..Self::default()
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn base_url(&self) -> &str {
        self.api_base
            .as_deref()
            .map(|b| b.trim_end_matches('/'))
            .unwrap_or(Self::DEFAULT_BASE_URL)
    }
}

/// Delays of the simulated prescription submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub processing_delay_ms: u64,
    pub reset_delay_ms: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: 2000,
            reset_delay_ms: 3000,
        }
    }
}

const DEFAULT_SYSTEM_INSTRUCTION: &str = r#"You are a helpful, professional, and empathetic pharmacist assistant for "Easy Health Care - Online Pharmacy" in Nepal.
Your goal is to assist users with general medication questions, OTC product recommendations, and explain how the prescription upload works.

Guidelines:
1. Always be polite and concise.
2. If a user describes serious symptoms (chest pain, trouble breathing, severe bleeding, etc.), IMMEDIATELY advise them to see a doctor or go to a hospital. Do not try to treat them.
3. For minor ailments (headache, cold), suggest OTC categories but add a disclaimer that you are an AI and they should verify with a real pharmacist.
4. Explain that for prescription meds (Antibiotics, Cardiac, etc.), they MUST upload a doctor's prescription via the "Upload Prescription" tab.
5. Mention "EasyCare 365" for chronic disease refill plans if relevant.
6. Prices are in NPR (Nepalese Rupees).

Keep answers short and helpful.
"#;
