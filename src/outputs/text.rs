use crate::kernel::form::RoastIntensity;
use crate::kernel::notice::{NoticeVariant, Notification};

/// What the session tells its front end. The front end only draws these.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    ShowForm,
    Loading,
    /// A result arrived; lines follow as `Line` updates.
    ResultHeader {
        name: String,
        intensity: RoastIntensity,
        lines: usize,
    },
    Line { index: usize, text: String },
    Playback(bool),
    Notice(Notification),
    Closed,
}

pub const LOADING_TITLE: &str = "Preparing Your Destruction";
pub const LOADING_BODY: &str = "Our AI is carefully crafting the perfect roast just for you...";

/// Plain-text rendering for a terminal.
pub fn render(update: &UiUpdate) -> Option<String> {
    match update {
        UiUpdate::ShowForm => Some(
            "Prepare for Annihilation\nThe more details you provide, the more savage the roast!"
                .to_string(),
        ),
        UiUpdate::Loading => Some(format!("{}\n{}", LOADING_TITLE, LOADING_BODY)),
        UiUpdate::ResultHeader { name, intensity, .. } => Some(format!(
            "ROAST COMPLETE\nVictim: {}  [{} ROAST]",
            name,
            intensity.as_str().to_uppercase()
        )),
        UiUpdate::Line { text, .. } => Some(format!("  > {}", text)),
        UiUpdate::Playback(true) => Some("(reading aloud, 'speak' again to stop)".to_string()),
        UiUpdate::Playback(false) => None,
        UiUpdate::Notice(notice) => Some(render_notice(notice)),
        UiUpdate::Closed => None,
    }
}

pub fn render_notice(notice: &Notification) -> String {
    let marker = match notice.variant {
        NoticeVariant::Info => "*",
        NoticeVariant::Destructive => "!",
    };
    format!("[{}] {}: {}", marker, notice.title, notice.description)
}
