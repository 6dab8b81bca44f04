//! Spoken prompt seam
//!
//! Actual text-to-speech (voice selection, audio output) is an external
//! collaborator; the core only needs somewhere to hand utterances. Each
//! utterance replaces any still in progress; there is no queue. The
//! voice is chosen once at init and held as explicit collaborator state
//! rather than an ambient global.

/// Fire-and-forget utterance sink.
pub trait Speaker {
    /// Speak a drill symbol (slow, clear).
    fn speak_symbol(&mut self, symbol: &str);
    /// Speak a coaching line (warm, slightly higher pitch).
    fn speak_coach(&mut self, line: &str);
}

/// Coach lines, matching the original app's wording.
pub mod lines {
    pub const PASSED: &str = "你通過了!";
    pub const RETRY: &str = "未通過，再試試看。";
    pub const NEXT_LEVEL: &str = "太好了，進入下一關。";
}

/// Terminal stand-in for a TTS engine: utterances become prompt lines.
pub struct TerminalSpeaker {
    voice: &'static str,
}

impl TerminalSpeaker {
    /// Pick the voice once; later utterances reuse it.
    pub fn init() -> Self {
        TerminalSpeaker { voice: "zh-TW" }
    }
}

impl Speaker for TerminalSpeaker {
    fn speak_symbol(&mut self, symbol: &str) {
        println!("🔊 [{}] {}", self.voice, symbol);
    }

    fn speak_coach(&mut self, line: &str) {
        println!("🗣️  {}", line);
    }
}

/// Discards utterances; used by tests and non-interactive commands.
#[derive(Default)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak_symbol(&mut self, _symbol: &str) {}
    fn speak_coach(&mut self, _line: &str) {}
}
