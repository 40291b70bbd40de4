use failure::Error;
use serde_json::json;

const MESSAGING_API_BASE: &str = "https://api.line.me";

/// Sends reply messages through the messaging platform's push API. Each
/// inbound event carries a one-shot reply token that addresses the response.
pub struct ReplyClient {
    http: reqwest::Client,
    access_token: String,
}

impl ReplyClient {
    pub fn new(access_token: String) -> ReplyClient {
        ReplyClient {
            http: reqwest::Client::new(),
            access_token,
        }
    }

    pub async fn reply(&self, reply_token: &str, text: &str) -> Result<(), Error> {
        let body = json!({
            "replyToken": reply_token,
            "messages": [{ "type": "text", "text": text }],
        });
        self.http
            .post(&format!("{}/v2/bot/message/reply", MESSAGING_API_BASE))
            .header("Authorization", "Bearer ".to_string() + &self.access_token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
