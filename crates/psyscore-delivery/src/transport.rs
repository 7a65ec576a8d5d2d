use std::collections::BTreeMap;
use std::time::Duration;

use psyscore_export::payload::ResultPayload;
use serde::{Deserialize, Serialize};
use ureq::Agent;

use crate::error::DeliveryError;

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Delivers a result payload to clinical staff.
pub trait Transport {
    fn send(&self, payload: &ResultPayload) -> Result<(), DeliveryError>;
}

/// Credentials and endpoint for an EmailJS-compatible REST service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    /// Private key, required when the account blocks non-browser calls.
    pub access_token: Option<String>,
    /// Overrides [`EMAILJS_ENDPOINT`].
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl EmailSettings {
    pub fn is_complete(&self) -> bool {
        !self.service_id.is_empty() && !self.template_id.is_empty() && !self.public_key.is_empty()
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: BTreeMap<&'a str, String>,
}

/// Posts the payload as template parameters to the email service.
pub struct EmailJsTransport {
    settings: EmailSettings,
    agent: Agent,
}

impl EmailJsTransport {
    pub fn new(settings: EmailSettings) -> Self {
        let timeout = Duration::from_secs(settings.timeout_secs.unwrap_or(15));
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self { settings, agent }
    }

    fn endpoint(&self) -> &str {
        self.settings.endpoint.as_deref().unwrap_or(EMAILJS_ENDPOINT)
    }
}

impl Transport for EmailJsTransport {
    fn send(&self, payload: &ResultPayload) -> Result<(), DeliveryError> {
        if !self.settings.is_complete() {
            return Err(DeliveryError::Disabled);
        }

        let request = SendRequest {
            service_id: &self.settings.service_id,
            template_id: &self.settings.template_id,
            user_id: &self.settings.public_key,
            access_token: self.settings.access_token.as_deref(),
            // Email templates substitute strings only.
            template_params: payload
                .iter()
                .map(|(key, value)| (key, value.to_text()))
                .collect(),
        };
        self.agent.post(self.endpoint()).send_json(&request)?;

        tracing::info!(
            service = %self.settings.service_id,
            template = %self.settings.template_id,
            "result email sent"
        );
        Ok(())
    }
}

/// Used when no email service is configured. Every send fails, so
/// submissions end up saved but not sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTransport;

impl Transport for DisabledTransport {
    fn send(&self, _payload: &ResultPayload) -> Result<(), DeliveryError> {
        Err(DeliveryError::Disabled)
    }
}

/// Pick the HTTP transport when the settings are usable.
pub fn transport_for(settings: Option<EmailSettings>) -> Box<dyn Transport> {
    match settings {
        Some(settings) if settings.is_complete() => Box::new(EmailJsTransport::new(settings)),
        _ => {
            tracing::warn!("email settings incomplete, results will not be emailed");
            Box::new(DisabledTransport)
        }
    }
}
