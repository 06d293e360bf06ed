//! Language toggle state machine.
//!
//! # Overview
//!
//! [`ToggleController`] owns one page load: the document, the translation
//! context (original store plus latest inventory), the resolver and the
//! preference store. Each transition runs collection, resolution and
//! rewriting strictly in that order, then persists the new language and
//! updates the toggle control.
//!
//! The displayed language is tracked by the controller itself and never
//! re-derived from document content. A batch that degrades to pass-through
//! for a non-source target is not written: the page text, the state, the
//! control and the stored preference all stay as they were.
//!
//! Transitions take `&mut self`, so one controller never runs two of them
//! at once.

use crate::dom::Document;
use crate::inventory::{ExclusionRules, TranslationContext};
use crate::prefs::{KeyValueStorage, PreferenceStore};
use crate::resolver::{ResolvedTier, Resolver};
use crate::rewriter;

/// Element id of the language toggle button.
pub const TOGGLE_ELEMENT_ID: &str = "lang-toggle";

/// Which language the page currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayState {
    /// Pristine source text.
    ShowingSource,
    /// Translated text.
    ShowingTarget,
}

/// Visual state of the toggle button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleControl {
    /// `aria-pressed`: `true` while a translation is shown.
    pub pressed: bool,
    /// Button text: the language a click switches to, uppercased.
    pub label: String,
}

impl ToggleControl {
    /// What: Control state for a displayed language.
    ///
    /// Inputs:
    /// - `showing_source`: Whether the page shows the source language
    /// - `source`: Source language code
    /// - `target`: Toggle target language code
    ///
    /// Output:
    /// - Pressed flag and the label naming the other language
    #[must_use]
    pub fn for_state(showing_source: bool, source: &str, target: &str) -> Self {
        let other = if showing_source { target } else { source };
        Self {
            pressed: !showing_source,
            label: other.to_uppercase(),
        }
    }
}

/// Result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Language the transition aimed for.
    pub language: String,
    /// Tier that served the batch.
    pub tier: ResolvedTier,
    /// Whether the displayed language (and the preference) changed.
    pub switched: bool,
    /// Number of units in the batch.
    pub units: usize,
}

/// Drives collection, resolution, rewriting and persistence for one page.
#[derive(Debug)]
pub struct ToggleController<S> {
    /// Page being translated.
    document: Document,
    /// Originals and latest inventory for this page load.
    context: TranslationContext,
    /// Unit selection rules.
    rules: ExclusionRules,
    /// Tiered translation chain.
    resolver: Resolver,
    /// Persisted language/theme.
    prefs: PreferenceStore<S>,
    /// The non-source language of the toggle.
    target_language: String,
    /// Language currently shown.
    displayed: String,
    /// Toggle button state.
    control: ToggleControl,
}

impl<S: KeyValueStorage> ToggleController<S> {
    /// What: Create a controller for a freshly loaded page.
    ///
    /// Inputs:
    /// - `document`: Page in its pristine source language
    /// - `resolver`: Translation chain (its source language is the page language)
    /// - `prefs`: Preference store
    /// - `target_language`: Language the toggle switches to
    ///
    /// Output:
    /// - Controller showing the source language; nothing collected yet
    pub fn new(
        document: Document,
        resolver: Resolver,
        prefs: PreferenceStore<S>,
        target_language: &str,
    ) -> Self {
        let source = resolver.source_language().to_string();
        let target_language = target_language.trim().to_string();
        let control = ToggleControl::for_state(true, &source, &target_language);
        Self {
            document,
            context: TranslationContext::new(),
            rules: ExclusionRules::default(),
            resolver,
            prefs,
            target_language,
            displayed: source,
            control,
        }
    }

    /// Replace the unit selection rules.
    #[must_use]
    pub fn with_rules(mut self, rules: ExclusionRules) -> Self {
        self.rules = rules;
        self
    }

    /// What: Run the page-load sequence.
    ///
    /// Output:
    /// - `Some(outcome)` when a saved non-source language was applied; `None` otherwise
    ///
    /// Details:
    /// - Collects once so originals are captured from the pristine page.
    /// - Reads the saved preference and translates immediately when it differs
    ///   from the source language.
    pub async fn initialize(&mut self) -> Option<ToggleOutcome> {
        let count = self.context.collect(&self.document, &self.rules).len();
        let saved = self.prefs.load();
        tracing::info!(
            units = count,
            saved = %saved.language,
            theme = %saved.theme,
            "page initialised"
        );
        self.sync_control();
        if self.resolver.is_source(&saved.language) {
            return None;
        }
        Some(self.translate_to(&saved.language).await)
    }

    /// What: Switch to the other language.
    ///
    /// Output:
    /// - Outcome of the transition
    ///
    /// Details:
    /// - The next language is derived from the controller's own state, not from document text.
    pub async fn toggle(&mut self) -> ToggleOutcome {
        let next = match self.display_state() {
            DisplayState::ShowingSource => self.target_language.clone(),
            DisplayState::ShowingTarget => self.resolver.source_language().to_string(),
        };
        tracing::debug!(from = %self.displayed, to = %next, "toggle requested");
        self.translate_to(&next).await
    }

    /// What: Show the page in `language`.
    ///
    /// Inputs:
    /// - `language`: Target language code (the source language restores originals)
    ///
    /// Output:
    /// - Outcome of the transition
    ///
    /// Details:
    /// - Runs collection, then resolution, then rewriting; none overlaps the next.
    /// - When every tier degraded to pass-through for a non-source language,
    ///   nothing is rewritten, persisted or flipped, so the page keeps showing
    ///   the language the control reports.
    pub async fn translate_to(&mut self, language: &str) -> ToggleOutcome {
        let language = language.trim().to_string();
        self.context.collect(&self.document, &self.rules);
        let resolution = self
            .resolver
            .resolve_detailed(
                &self.context.last_inventory,
                &self.context.originals,
                &language,
            )
            .await;
        let units = self.context.last_inventory.len();
        let switched = resolution.tier != ResolvedTier::PassThrough
            || units == 0
            || self.resolver.is_source(&language);
        if switched {
            rewriter::apply(
                &mut self.document,
                &self.context.last_inventory,
                &resolution.texts,
            );
            self.displayed.clone_from(&language);
            self.prefs.save_language(&language);
            tracing::info!(lang = %language, tier = ?resolution.tier, units, "language switched");
        } else {
            tracing::warn!(
                lang = %language,
                units,
                "no translation available; keeping current page text"
            );
        }
        self.sync_control();

        ToggleOutcome {
            language,
            tier: resolution.tier,
            switched,
            units,
        }
    }

    /// Whether the page shows source or translated text.
    #[must_use]
    pub fn display_state(&self) -> DisplayState {
        if self.resolver.is_source(&self.displayed) {
            DisplayState::ShowingSource
        } else {
            DisplayState::ShowingTarget
        }
    }

    /// Language currently shown.
    #[must_use]
    pub fn displayed_language(&self) -> &str {
        &self.displayed
    }

    /// Toggle button state.
    #[must_use]
    pub const fn control(&self) -> &ToggleControl {
        &self.control
    }

    /// The page.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Consume the controller, returning the page.
    #[must_use]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Originals and latest inventory.
    #[must_use]
    pub const fn context(&self) -> &TranslationContext {
        &self.context
    }

    /// Preference store.
    #[must_use]
    pub const fn preferences(&self) -> &PreferenceStore<S> {
        &self.prefs
    }

    /// Recompute the control and mirror it onto the toggle element, if present.
    fn sync_control(&mut self) {
        let showing_source = self.display_state() == DisplayState::ShowingSource;
        self.control = ToggleControl::for_state(
            showing_source,
            self.resolver.source_language(),
            &self.target_language,
        );
        if let Some(id) = self.document.element_by_id(TOGGLE_ELEMENT_ID) {
            let pressed = if self.control.pressed { "true" } else { "false" };
            self.document.set_attr(id, "aria-pressed", pressed);
            self.document.set_text_content(id, &self.control.label);
        }
    }
}
