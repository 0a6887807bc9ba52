//! Reward notification dispatch
//!
//! Ordered best-effort channel chain: SMS webhook, then alert email, then
//! the web log. The dispatcher walks the chain until one channel accepts
//! the notice; every attempt is recorded in the shared in-memory log so the
//! admin dashboard can show delivery history. Dispatch failures never
//! surface to the check-in caller.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use perk_common::config::NotifyConfig;
use tracing::{info, instrument, warn};

/// Notice describing a freshly earned reward
#[derive(Debug, Clone)]
pub struct RewardNotice {
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    pub reward_type: String,
    pub total_rewards: i32,
}

impl RewardNotice {
    /// Human-readable message body shared by all channels
    pub fn message(&self) -> String {
        format!(
            "{}, you earned a {} (reward #{})! Show this at the counter.",
            self.customer_name, self.reward_type, self.total_rewards
        )
    }
}

/// One recorded delivery attempt
#[derive(Debug, Clone)]
pub struct NotificationRecord {
    pub at: DateTime<Utc>,
    pub channel: String,
    pub recipient: String,
    pub message: String,
    pub success: bool,
}

/// Shared in-memory log of delivery attempts
///
/// Constructed once at startup and injected through `ServiceContext`;
/// cloning shares the underlying storage.
#[derive(Clone, Default)]
pub struct NotificationLog {
    records: Arc<RwLock<Vec<NotificationRecord>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a delivery attempt
    pub fn record(&self, record: NotificationRecord) {
        self.records.write().push(record);
    }

    /// Snapshot of all recorded attempts, oldest first
    pub fn snapshot(&self) -> Vec<NotificationRecord> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl std::fmt::Debug for NotificationLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationLog")
            .field("records", &self.len())
            .finish()
    }
}

/// A single delivery channel in the chain
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Channel name as recorded in the log
    fn name(&self) -> &'static str;

    /// Where this channel would deliver the notice
    fn recipient(&self, notice: &RewardNotice) -> String;

    /// Attempt delivery; an error lets the chain fall through
    async fn send(&self, notice: &RewardNotice) -> anyhow::Result<()>;
}

/// SMS delivery through a configured webhook relay
pub struct SmsWebhookChannel {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl SmsWebhookChannel {
    pub fn new(webhook_url: Option<String>) -> Self {
        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl NotificationChannel for SmsWebhookChannel {
    fn name(&self) -> &'static str {
        "sms"
    }

    fn recipient(&self, notice: &RewardNotice) -> String {
        notice.phone.clone()
    }

    async fn send(&self, notice: &RewardNotice) -> anyhow::Result<()> {
        let url = self
            .webhook_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("SMS_WEBHOOK_URL not configured"))?;

        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({
                "to": notice.phone,
                "body": notice.message(),
            }))
            .send()
            .await?;

        response.error_for_status()?;
        Ok(())
    }
}

/// Alert email channel
///
/// Stub pending a mail provider integration: when an alert address is
/// configured the notice is handed to the process log and counted as
/// delivered, otherwise the chain falls through.
pub struct EmailChannel {
    alert_email: Option<String>,
}

impl EmailChannel {
    pub fn new(alert_email: Option<String>) -> Self {
        Self { alert_email }
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    fn recipient(&self, notice: &RewardNotice) -> String {
        self.alert_email
            .clone()
            .unwrap_or_else(|| notice.email.clone())
    }

    async fn send(&self, notice: &RewardNotice) -> anyhow::Result<()> {
        let to = self
            .alert_email
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("ALERT_EMAIL not configured"))?;

        info!(to, customer = %notice.customer_name, "reward alert email queued");
        Ok(())
    }
}

/// Last-resort channel, always succeeds
pub struct WebLogChannel;

#[async_trait]
impl NotificationChannel for WebLogChannel {
    fn name(&self) -> &'static str {
        "weblog"
    }

    fn recipient(&self, notice: &RewardNotice) -> String {
        notice.phone.clone()
    }

    async fn send(&self, notice: &RewardNotice) -> anyhow::Result<()> {
        info!(
            customer = %notice.customer_name,
            reward = %notice.reward_type,
            "reward notification: {}",
            notice.message()
        );
        Ok(())
    }
}

/// Walks the channel chain until the first successful delivery
pub struct NotificationDispatcher {
    channels: Vec<Box<dyn NotificationChannel>>,
    log: NotificationLog,
}

impl NotificationDispatcher {
    pub fn new(channels: Vec<Box<dyn NotificationChannel>>, log: NotificationLog) -> Self {
        Self { channels, log }
    }

    /// Build the standard SMS → email → web-log chain from configuration
    pub fn from_config(config: &NotifyConfig, log: NotificationLog) -> Self {
        Self::new(
            vec![
                Box::new(SmsWebhookChannel::new(config.sms_webhook_url.clone())),
                Box::new(EmailChannel::new(config.alert_email.clone())),
                Box::new(WebLogChannel),
            ],
            log,
        )
    }

    /// Try each channel in order, recording every attempt, stopping at the
    /// first success. Returns the name of the successful channel, if any.
    #[instrument(skip(self, notice), fields(customer = %notice.customer_name))]
    pub async fn dispatch(&self, notice: &RewardNotice) -> Option<&'static str> {
        for channel in &self.channels {
            let outcome = channel.send(notice).await;
            let success = outcome.is_ok();

            self.log.record(NotificationRecord {
                at: Utc::now(),
                channel: channel.name().to_string(),
                recipient: channel.recipient(notice),
                message: notice.message(),
                success,
            });

            match outcome {
                Ok(()) => {
                    info!(channel = channel.name(), "reward notice delivered");
                    return Some(channel.name());
                }
                Err(err) => {
                    warn!(channel = channel.name(), error = %err, "notification channel failed");
                }
            }
        }

        warn!("all notification channels failed");
        None
    }
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("channels", &self.channels.len())
            .finish()
    }
}
