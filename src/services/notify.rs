//! Transactional email and SMS alert delivery.
//!
//! Both channels are best-effort REST calls. Email failures are surfaced in
//! the decision record; SMS is fire-and-forget on the failure path.

use crate::config::{EmailConfig, SmsConfig};
use crate::error::{TradeError, TradeResult};
use async_trait::async_trait;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Transactional email sent after every placed order.
    async fn send_order_email(&self, subject: &str, text: &str, html: &str) -> TradeResult<()>;

    /// Alert sent when a decision cycle fails.
    async fn send_failure_sms(&self, body: &str) -> TradeResult<()>;
}

pub struct RestNotifier {
    http: reqwest::Client,
    email: EmailConfig,
    sms: SmsConfig,
}

impl RestNotifier {
    pub fn new(http: reqwest::Client, email: EmailConfig, sms: SmsConfig) -> Self {
        Self { http, email, sms }
    }
}

#[async_trait]
impl Notifier for RestNotifier {
    async fn send_order_email(&self, subject: &str, text: &str, html: &str) -> TradeResult<()> {
        let url = format!(
            "{}/v3/{}/messages",
            self.email.base_url.trim_end_matches('/'),
            self.email.domain
        );

        let response = self
            .http
            .post(&url)
            .basic_auth("api", Some(&self.email.api_key))
            .form(&[
                ("from", self.email.from.as_str()),
                ("to", self.email.to.as_str()),
                ("subject", subject),
                ("text", text),
                ("html", html),
            ])
            .send()
            .await
            .map_err(|e| TradeError::Notification(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TradeError::Notification(format!(
                "email send returned status {}",
                response.status()
            )));
        }

        Ok(())
    }

    async fn send_failure_sms(&self, body: &str) -> TradeResult<()> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.sms.base_url.trim_end_matches('/'),
            self.sms.account_sid
        );

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.sms.account_sid, Some(&self.sms.auth_token))
            .form(&[
                ("From", self.sms.from.as_str()),
                ("To", self.sms.to.as_str()),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| TradeError::Notification(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TradeError::Notification(format!(
                "sms send returned status {}",
                response.status()
            )));
        }

        Ok(())
    }
}
