/// User-facing toast. Dismissible, never blocking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Info,
    Destructive,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }

    pub fn is_error(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }

    // Canned notices

    pub fn roast_ready(name: &str) -> Self {
        Self::info("Roast ready!", format!("{} has been thoroughly roasted.", name))
    }

    pub fn roast_failed() -> Self {
        Self::destructive("Roast failed", "Failed to generate roast. Please try again!")
    }

    pub fn copied() -> Self {
        Self::info("Roast copied!", "The roast has been copied to your clipboard.")
    }

    pub fn copy_failed() -> Self {
        Self::destructive("Copy failed", "Couldn't copy the roast to clipboard.")
    }

    pub fn speech_unsupported() -> Self {
        Self::destructive(
            "Text-to-Speech not supported",
            "Your platform doesn't support text-to-speech functionality.",
        )
    }

    pub fn speech_failed(reason: &str) -> Self {
        Self::destructive("Read aloud failed", reason.to_string())
    }

    pub fn share_failed(reason: &str) -> Self {
        Self::destructive("Share failed", reason.to_string())
    }
}
