use crate::types::InboundMessage;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use bytes::Bytes;
use failure::Error;
use hmac::{Hmac, Mac};
use log::{debug, error, info, warn};
use serde_json::Value;
use sha2::Sha256;
use tokio::sync::mpsc::Sender;
use warp::http::StatusCode;
use warp::{Filter, Rejection};

#[derive(Debug)]
struct InvalidSignature;

impl warp::reject::Reject for InvalidSignature {}

#[derive(Debug)]
struct HandleCallbackError;

impl warp::reject::Reject for HandleCallbackError {}

pub async fn run(tx: Sender<InboundMessage>, channel_secret: String) {
    let health = warp::get().and(warp::path::end()).map(|| "Hello, World!");
    let callback = warp::post()
        .and(warp::path!("callback"))
        .and(warp::header::<String>("x-line-signature"))
        .and(warp::body::bytes())
        .and(warp::any().map(move || tx.clone()))
        .and(warp::any().map(move || channel_secret.clone()))
        .and_then(handle_callback);
    let routes = health.or(callback).recover(handle_rejection);
    warp::serve(routes).run(([0, 0, 0, 0], 8000)).await;
}

async fn handle_callback(
    signature: String,
    body: Bytes,
    tx: Sender<InboundMessage>,
    channel_secret: String,
) -> Result<impl warp::Reply, Rejection> {
    if !verify_signature(&channel_secret, &signature, &body) {
        warn!("Rejecting callback with invalid signature");
        return Err(warp::reject::custom(InvalidSignature));
    }
    match dispatch_events(&body, tx).await {
        Ok(()) => Ok("OK"),
        Err(e) => {
            error!("Error handling callback: {:?}", e);
            Err(warp::reject::custom(HandleCallbackError))
        }
    }
}

/// The platform signs the raw request body with HMAC-SHA256 keyed by the
/// channel secret and sends the base64 digest in `x-line-signature`.
fn verify_signature(secret: &str, signature: &str, body: &[u8]) -> bool {
    let claimed = match BASE64.decode(signature.trim()) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    let mut mac = match Hmac::<Sha256>::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(body);
    mac.verify_slice(&claimed).is_ok()
}

async fn dispatch_events(body: &[u8], mut tx: Sender<InboundMessage>) -> Result<(), Error> {
    let json: Value = serde_json::from_slice(body)?;
    let events = json["events"]
        .as_array()
        .ok_or_else(|| format_err!("Missing events in callback body"))?;
    for event in events {
        if event["type"].as_str() != Some("message")
            || event["message"]["type"].as_str() != Some("text")
        {
            debug!("Ignoring event of type {:?}", event["type"]);
            continue;
        }
        let reply_token = event["replyToken"]
            .as_str()
            .ok_or_else(|| format_err!("Missing replyToken field"))?;
        let text = event["message"]["text"]
            .as_str()
            .ok_or_else(|| format_err!("Missing message text field"))?;
        info!("Received message: {}", text);
        tx.send(InboundMessage {
            text: text.to_string(),
            reply_token: reply_token.to_string(),
        })
        .await?;
    }
    Ok(())
}

async fn handle_rejection(err: Rejection) -> Result<impl warp::Reply, Rejection> {
    if err.find::<InvalidSignature>().is_some() {
        Ok(warp::reply::with_status(
            "invalid signature",
            StatusCode::BAD_REQUEST,
        ))
    } else {
        Err(err)
    }
}
