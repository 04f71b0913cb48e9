use std::fmt;

use crate::domain::value::SenderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// The closed set of provider calls this client issues.
///
/// Each variant pairs an endpoint template with a success predicate over the
/// parsed payload (see the transport layer).
pub enum Operation {
    GetBalance,
    GetPhoneType,
    SendSms,
    SendTextToSpeech,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetBalance => "get_balance",
            Self::GetPhoneType => "get_phone_type",
            Self::SendSms => "send_sms",
            Self::SendTextToSpeech => "send_text_to_speech",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

#[derive(Debug, Clone)]
/// Outbound text message.
///
/// `to` is normalized by the client before sending. When `from` is not set, the
/// client's configured default sender is used; if there is none, the parameter
/// is omitted.
pub struct SendSms {
    pub from: Option<SenderId>,
    pub to: String,
    pub text: String,
}

impl SendSms {
    pub fn new(to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            from: None,
            to: to.into(),
            text: text.into(),
        }
    }

    pub fn from(mut self, from: SenderId) -> Self {
        self.from = Some(from);
        self
    }
}

#[derive(Debug, Clone)]
/// Outbound text-to-speech call.
///
/// Both `from` (a voice-enabled virtual number) and `to` are normalized by the
/// client. `repeat` is omitted from the request when unset.
pub struct SendTextToSpeech {
    pub from: String,
    pub to: String,
    pub text: String,
    pub repeat: Option<u32>,
}

impl SendTextToSpeech {
    pub fn new(from: impl Into<String>, to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            text: text.into(),
            repeat: None,
        }
    }

    /// How many times the message is played.
    pub fn repeat(mut self, repeat: u32) -> Self {
        self.repeat = Some(repeat);
        self
    }
}
