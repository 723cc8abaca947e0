//! Per-platform configuration: endpoints and payload shapes.
//!
//! Platforms differ only in data. Adding one means adding an entry to
//! `builtin_platforms`, never a new code path.

use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::adapters::ProbeRequest;
use crate::domain::{Target, TargetKind};

/// Maps a target to the JSON body an endpoint expects
pub type PayloadBuilder = fn(&Target) -> Value;

/// Static description of one platform
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Lowercase key used in config, CLI and log file names
    pub key: String,

    /// Display name written to the results file
    pub name: String,

    pub reset_url: String,

    pub signup_url: String,

    pub reset_payload: PayloadBuilder,

    pub signup_payload: PayloadBuilder,
}

impl PlatformConfig {
    /// JSON POST to the password-reset endpoint
    pub fn reset_request(&self, target: &Target) -> ProbeRequest {
        ProbeRequest::post_json(&self.reset_url, (self.reset_payload)(target))
    }

    /// JSON POST to the signup endpoint
    pub fn signup_request(&self, target: &Target) -> ProbeRequest {
        ProbeRequest::post_json(&self.signup_url, (self.signup_payload)(target))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("Unknown platform '{name}'. Known platforms: {known}")]
    Unknown { name: String, known: String },
}

/// Conventional JSON field for an identifier kind
fn identifier_field(kind: TargetKind) -> &'static str {
    match kind {
        TargetKind::Email => "email",
        TargetKind::Phone => "phone_number",
        TargetKind::Username => "username",
    }
}

/// `{ <field for kind>: value }`
fn identifier_payload(target: &Target) -> Value {
    let mut body = Map::new();
    body.insert(
        identifier_field(target.kind).to_string(),
        Value::String(target.value.clone()),
    );
    Value::Object(body)
}

/// Identifier payload plus the username under `username_key`, if known
fn with_username(target: &Target, username_key: &str) -> Value {
    let mut body = identifier_payload(target);
    if let (Some(name), Value::Object(map)) = (target.effective_username(), &mut body) {
        map.insert(username_key.to_string(), Value::String(name.to_string()));
    }
    body
}

fn bumble_reset(target: &Target) -> Value {
    json!({
        "$gpb": "badoo.bma.BadooMessage",
        "body": [{
            "message_type": 2,
            "server_request_password": { "phone_or_email": target.value }
        }],
        "message_type": 2
    })
}

fn bumble_signup(target: &Target) -> Value {
    json!({
        "$gpb": "badoo.bma.BadooMessage",
        "body": [{
            "message_type": 680,
            "server_validate_user_field": { "phone_or_email": target.value }
        }],
        "message_type": 680
    })
}

fn tinder_reset(target: &Target) -> Value {
    identifier_payload(target)
}

fn tinder_signup(target: &Target) -> Value {
    identifier_payload(target)
}

fn pof_reset(target: &Target) -> Value {
    json!({ "emailOrUsername": target.value })
}

fn pof_signup(target: &Target) -> Value {
    with_username(target, "username")
}

fn ashley_madison_reset(target: &Target) -> Value {
    identifier_payload(target)
}

fn ashley_madison_signup(target: &Target) -> Value {
    with_username(target, "nickname")
}

fn match_reset(target: &Target) -> Value {
    identifier_payload(target)
}

fn match_signup(target: &Target) -> Value {
    with_username(target, "userName")
}

/// The five supported platforms, in output order
pub fn builtin_platforms() -> Vec<PlatformConfig> {
    vec![
        PlatformConfig {
            key: "bumble".to_string(),
            name: "Bumble".to_string(),
            reset_url: "https://bumble.com/mwebapi.phtml?SERVER_REQUEST_PASSWORD".to_string(),
            signup_url: "https://bumble.com/mwebapi.phtml?SERVER_VALIDATE_USER_FIELD".to_string(),
            reset_payload: bumble_reset,
            signup_payload: bumble_signup,
        },
        PlatformConfig {
            key: "tinder".to_string(),
            name: "Tinder".to_string(),
            reset_url: "https://api.gotinder.com/v2/auth/password/reset".to_string(),
            signup_url: "https://api.gotinder.com/v2/auth/validate".to_string(),
            reset_payload: tinder_reset,
            signup_payload: tinder_signup,
        },
        PlatformConfig {
            key: "pof".to_string(),
            name: "POF".to_string(),
            reset_url: "https://www.pof.com/api/account/forgotpassword".to_string(),
            signup_url: "https://www.pof.com/api/registration/validate".to_string(),
            reset_payload: pof_reset,
            signup_payload: pof_signup,
        },
        PlatformConfig {
            key: "ashleymadison".to_string(),
            name: "AshleyMadison".to_string(),
            reset_url: "https://www.ashleymadison.com/api/v1/password/forgot".to_string(),
            signup_url: "https://www.ashleymadison.com/api/v1/signup/validate".to_string(),
            reset_payload: ashley_madison_reset,
            signup_payload: ashley_madison_signup,
        },
        PlatformConfig {
            key: "match".to_string(),
            name: "Match".to_string(),
            reset_url: "https://www.match.com/api/account/password/reset".to_string(),
            signup_url: "https://www.match.com/api/registration/email/validate".to_string(),
            reset_payload: match_reset,
            signup_payload: match_signup,
        },
    ]
}

/// Pick platforms by key (case-insensitive). An empty list selects all,
/// in built-in order.
pub fn select_platforms(names: &[String]) -> Result<Vec<PlatformConfig>, PlatformError> {
    let all = builtin_platforms();
    if names.is_empty() {
        return Ok(all);
    }

    let mut selected: Vec<PlatformConfig> = Vec::new();
    for name in names {
        let wanted = name.trim().to_ascii_lowercase();
        let platform = all.iter().find(|p| p.key == wanted).ok_or_else(|| {
            PlatformError::Unknown {
                name: name.clone(),
                known: all
                    .iter()
                    .map(|p| p.key.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }
        })?;

        if !selected.iter().any(|p| p.key == platform.key) {
            selected.push(platform.clone());
        }
    }

    Ok(selected)
}
