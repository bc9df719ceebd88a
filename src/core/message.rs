/// Visual treatment of a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Authored by the logged-in user.
    Own,
    /// Broadcast from someone else.
    Peer,
    /// Private message addressed to the logged-in user.
    Private,
    /// Notices from the server or the client itself.
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Sender header shown above a run of content lines.
    Label,
    Content,
}

/// One rendered line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub kind: LineKind,
    pub tone: Tone,
    pub text: String,
}

impl TranscriptLine {
    pub fn new(kind: LineKind, tone: Tone, text: impl Into<String>) -> Self {
        Self {
            kind,
            tone,
            text: text.into(),
        }
    }

    pub fn label(tone: Tone, text: impl Into<String>) -> Self {
        Self::new(LineKind::Label, tone, text)
    }

    pub fn content(tone: Tone, text: impl Into<String>) -> Self {
        Self::new(LineKind::Content, tone, text)
    }

    pub fn is_label(&self) -> bool {
        self.kind == LineKind::Label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_kind() {
        let label = TranscriptLine::label(Tone::System, "system");
        let content = TranscriptLine::content(Tone::Peer, "hello");
        assert!(label.is_label());
        assert!(!content.is_label());
        assert_eq!(content.tone, Tone::Peer);
        assert_eq!(content.text, "hello");
    }
}
