use std::io::Read;

use crate::BoxErr;

const MAX_AUDIO_BYTES: u64 = 10 * 1024 * 1024;

/// Turns a line of dialogue into audio. Voice is best-effort everywhere it
/// is used: callers log failures and play on.
pub trait Voice {
    fn speak(&self, text: &str, is_boss: bool) -> Result<Vec<u8>, BoxErr>;
}

/// Proxies synthesis to an external text-to-speech endpoint.
pub struct HttpVoice {
    agent: ureq::Agent,
    url: String,
}

impl HttpVoice {
    pub fn new(url: String) -> Self {
        Self {
            agent: ureq::agent(),
            url,
        }
    }
}

impl Voice for HttpVoice {
    fn speak(&self, text: &str, is_boss: bool) -> Result<Vec<u8>, BoxErr> {
        let response = self
            .agent
            .post(&self.url)
            .send_json(serde_json::json!({ "text": text, "isBoss": is_boss }))?;
        let mut audio = Vec::new();
        response
            .into_reader()
            .take(MAX_AUDIO_BYTES)
            .read_to_end(&mut audio)?;
        Ok(audio)
    }
}

/// No synthesis configured: every line comes back as zero bytes of audio.
pub struct MuteVoice;

impl Voice for MuteVoice {
    fn speak(&self, _text: &str, _is_boss: bool) -> Result<Vec<u8>, BoxErr> {
        Ok(Vec::new())
    }
}
