//! The single commentary banner slot and its last-request-wins rule.

use allstar_core::stage::Stage;
use serde::Serialize;
use tracing::debug;

use super::commentary::CommentaryResult;

/// Banner text before the first transition.
pub const OPENING_MESSAGE: &str = "Ready for a love that wins every time?";

/// Banner text when a request is lost without any answer.
pub const DEFAULT_MESSAGE: &str = "You're my ultimate All-Star, baby!";

/// Shown while the request for the proposal is outstanding.
pub const PROPOSAL_LOADING: &str = "Counting every reason I love you… 💗";

/// Shown while any other request is outstanding.
pub const DEFAULT_LOADING: &str = "Reviewing the highlights...";

/// Loading phrase while entering `stage`.
#[must_use]
pub fn loading_phrase(stage: Stage) -> &'static str {
    if stage == Stage::Proposal {
        PROPOSAL_LOADING
    } else {
        DEFAULT_LOADING
    }
}

/// Identifies one commentary request. Later requests have larger numbers.
pub type Generation = u64;

/// Renderable view of the banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BannerView {
    /// Text to show.
    pub text: String,
    /// Whether a request is outstanding.
    pub loading: bool,
    /// Energy of the shown commentary, when it came with one.
    pub energy_level: Option<u8>,
}

/// The banner slot. Only answers to the newest request are applied.
#[derive(Debug, Clone)]
pub struct CommentaryBanner {
    message: String,
    energy_level: Option<u8>,
    loading_phrase: Option<&'static str>,
    generation: Generation,
}

impl CommentaryBanner {
    /// A banner showing the opening line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: OPENING_MESSAGE.to_owned(),
            energy_level: None,
            loading_phrase: None,
            generation: 0,
        }
    }

    /// Starts a new request, superseding any outstanding one.
    pub fn begin(&mut self, loading_phrase: &'static str) -> Generation {
        self.generation += 1;
        self.loading_phrase = Some(loading_phrase);
        self.generation
    }

    /// Applies an answer. Returns `false` (and changes nothing) when the
    /// answer belongs to a superseded request.
    pub fn resolve(&mut self, generation: Generation, result: CommentaryResult) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "dropping stale commentary");
            return false;
        }
        self.message = result.message;
        self.energy_level = Some(result.energy_level);
        self.loading_phrase = None;
        true
    }

    /// Gives up on a request that will never answer, showing the default
    /// line. Stale generations are ignored.
    pub fn abandon(&mut self, generation: Generation) -> bool {
        if generation != self.generation {
            return false;
        }
        self.message = DEFAULT_MESSAGE.to_owned();
        self.energy_level = None;
        self.loading_phrase = None;
        true
    }

    /// Whether a request is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading_phrase.is_some()
    }

    /// What to render.
    #[must_use]
    pub fn view(&self) -> BannerView {
        match self.loading_phrase {
            Some(phrase) => BannerView {
                text: phrase.to_owned(),
                loading: true,
                energy_level: None,
            },
            None => BannerView {
                text: self.message.clone(),
                loading: false,
                energy_level: self.energy_level,
            },
        }
    }
}

impl Default for CommentaryBanner {
    fn default() -> Self {
        Self::new()
    }
}
