// SPDX-License-Identifier: MPL-2.0
//! Caption tracks and cue lookup.

use std::sync::Arc;

/// One caption entry shown over `[start, end)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

impl Cue {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn contains(&self, secs: f64) -> bool {
        self.start <= secs && secs < self.end
    }
}

/// Rejected caption track input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CaptionError {
    #[error("cue {index} has an empty or invalid time window")]
    InvalidWindow { index: usize },
    #[error("cue {index} overlaps the previous cue")]
    Overlap { index: usize },
}

/// Cues of one language, sorted by start and non-overlapping.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionTrack {
    language: String,
    label: String,
    cues: Vec<Cue>,
}

impl CaptionTrack {
    /// Builds a track, sorting `cues` by start.
    ///
    /// # Errors
    ///
    /// Fails when a cue has `start >= end` or a non-finite bound, or when two
    /// cues overlap.
    pub fn new(
        language: impl Into<String>,
        label: impl Into<String>,
        mut cues: Vec<Cue>,
    ) -> Result<Self, CaptionError> {
        if let Some(index) = cues
            .iter()
            .position(|c| !c.start.is_finite() || !c.end.is_finite() || c.start >= c.end)
        {
            return Err(CaptionError::InvalidWindow { index });
        }

        cues.sort_by(|a, b| a.start.total_cmp(&b.start));
        if let Some(index) = cues
            .windows(2)
            .position(|pair| pair[1].start < pair[0].end)
        {
            return Err(CaptionError::Overlap { index: index + 1 });
        }

        Ok(Self {
            language: language.into(),
            label: label.into(),
            cues,
        })
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// The cue with `start <= secs < end`, if any.
    #[must_use]
    pub fn cue_at(&self, secs: f64) -> Option<&Cue> {
        let after = self.cues.partition_point(|c| c.start <= secs);
        let candidate = self.cues.get(after.checked_sub(1)?)?;
        candidate.contains(secs).then_some(candidate)
    }
}

/// Available caption tracks.
#[derive(Debug, Clone, Default)]
pub struct CaptionLibrary {
    tracks: Vec<Arc<CaptionTrack>>,
}

impl CaptionLibrary {
    pub fn new(tracks: impl IntoIterator<Item = CaptionTrack>) -> Self {
        Self {
            tracks: tracks.into_iter().map(Arc::new).collect(),
        }
    }

    /// Built-in demo tracks in English and Spanish.
    #[must_use]
    pub fn sample() -> Self {
        let english = CaptionTrack::new(
            "en",
            "English",
            vec![
                Cue::new(0.0, 5.0, "Welcome to our video!"),
                Cue::new(5.0, 10.0, "This is a sample caption in English."),
                Cue::new(10.0, 15.0, "Captions can be very helpful for accessibility."),
            ],
        );
        let spanish = CaptionTrack::new(
            "es",
            "Español",
            vec![
                Cue::new(0.0, 5.0, "¡Bienvenido a nuestro video!"),
                Cue::new(5.0, 10.0, "Este es un subtítulo de ejemplo en español."),
                Cue::new(
                    10.0,
                    15.0,
                    "Los subtítulos pueden ser muy útiles para la accesibilidad.",
                ),
            ],
        );
        Self::new([english, spanish].into_iter().filter_map(Result::ok))
    }

    pub fn tracks(&self) -> impl Iterator<Item = &CaptionTrack> {
        self.tracks.iter().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn get(&self, language: &str) -> Option<Arc<CaptionTrack>> {
        self.tracks
            .iter()
            .find(|t| t.language() == language)
            .cloned()
    }
}

/// Captions menu choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionSelection {
    Off,
    Language(String),
}

/// The library plus the active track. Selecting swaps the whole track.
#[derive(Debug, Clone, Default)]
pub struct Captions {
    library: CaptionLibrary,
    active: Option<Arc<CaptionTrack>>,
}

impl Captions {
    #[must_use]
    pub fn new(library: CaptionLibrary) -> Self {
        Self {
            library,
            active: None,
        }
    }

    /// Activates the selected track. Unknown languages turn captions off.
    pub fn select(&mut self, selection: &CaptionSelection) {
        self.active = match selection {
            CaptionSelection::Off => None,
            CaptionSelection::Language(language) => {
                let track = self.library.get(language);
                if track.is_none() {
                    tracing::warn!(%language, "no caption track for language");
                }
                track
            }
        };
    }

    #[must_use]
    pub fn selection(&self) -> CaptionSelection {
        match &self.active {
            Some(track) => CaptionSelection::Language(track.language().to_string()),
            None => CaptionSelection::Off,
        }
    }

    #[must_use]
    pub fn active(&self) -> Option<&CaptionTrack> {
        self.active.as_deref()
    }

    /// Text to render at `secs`, if any.
    #[must_use]
    pub fn text_at(&self, secs: f64) -> Option<&str> {
        self.active()?.cue_at(secs).map(|c| c.text.as_str())
    }

    #[must_use]
    pub fn library(&self) -> &CaptionLibrary {
        &self.library
    }
}
