//! Page commands: inventory, translate and toggle.

use std::path::{Path, PathBuf};

use inplace_translator::config::{ClientSettings, load_settings, preferences_path};
use inplace_translator::controller::{ToggleController, ToggleOutcome};
use inplace_translator::dom::Document;
use inplace_translator::inventory::{ExclusionRules, OriginalStore, collect};
use inplace_translator::prefs::{FileStorage, PreferenceStore};
use inplace_translator::resolver::Resolver;

use crate::args::utils::{Result, read_input, write_output};

/// Settings and preference location shared by the page commands.
#[derive(Debug)]
pub struct PageContext {
    /// Client settings.
    pub settings: ClientSettings,
    /// Preference file.
    pub prefs_path: PathBuf,
}

impl PageContext {
    /// What: Load settings and resolve the preference file.
    ///
    /// Inputs:
    /// - `config`: Explicit settings file, if given.
    /// - `prefs_file`: Explicit preference file, if given.
    ///
    /// Output:
    /// - Context with defaults for anything missing.
    pub fn load(config: Option<&Path>, prefs_file: Option<PathBuf>) -> Self {
        Self {
            settings: load_settings(config),
            prefs_path: prefs_file.unwrap_or_else(preferences_path),
        }
    }

    /// Preference store over the preference file.
    pub fn preferences(&self) -> PreferenceStore<FileStorage> {
        PreferenceStore::new(
            FileStorage::new(&self.prefs_path),
            &self.settings.source_language,
        )
    }

    /// Controller for one page load of `document`.
    pub fn controller(&self, document: Document) -> ToggleController<FileStorage> {
        ToggleController::new(
            document,
            Resolver::from_settings(&self.settings),
            self.preferences(),
            &self.settings.target_language,
        )
    }
}

/// What: Print the translatable units of a document.
///
/// Inputs:
/// - `file`: HTML file or `-`.
/// - `json`: Print a JSON array instead of `key<TAB>kind<TAB>text` lines.
///
/// # Errors
/// - Returns `Err` when the input cannot be read or the output cannot be written.
pub fn handle_inventory(file: &Path, json: bool) -> Result<()> {
    let doc = Document::parse(&read_input(file)?);
    let mut originals = OriginalStore::new();
    let units = collect(&doc, &ExclusionRules::default(), &mut originals);
    tracing::info!(file = %file.display(), units = units.len(), "inventory requested from CLI");
    let out = if json {
        serde_json::to_string_pretty(&units)?
    } else {
        units
            .iter()
            .map(|u| {
                let kind = match u.kind {
                    inplace_translator::inventory::UnitKind::Element => "element",
                    inplace_translator::inventory::UnitKind::TextNode => "text",
                };
                format!("{}\t{kind}\t{}", u.key, u.current_text.trim())
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    write_output(None, &out)
}

/// What: Translate a document to `language`.
///
/// Inputs:
/// - `ctx`: Settings and preferences.
/// - `file`: HTML file or `-`.
/// - `language`: Target language code.
/// - `output`: Output file, stdout when `None`.
///
/// # Errors
/// - Returns `Err` when the input cannot be read or the output cannot be written.
///
/// Details:
/// - The saved preference is applied first, as on a page load.
pub async fn handle_translate(
    ctx: &PageContext,
    file: &Path,
    language: &str,
    output: Option<&Path>,
) -> Result<()> {
    let mut ctl = ctx.controller(Document::parse(&read_input(file)?));
    if let Some(initial) = ctl.initialize().await {
        report(&initial);
    }
    let outcome = ctl.translate_to(language).await;
    report(&outcome);
    write_output(output, &ctl.document().to_html())
}

/// What: Load a document, apply the saved preference and toggle once.
///
/// Inputs:
/// - `ctx`: Settings and preferences.
/// - `file`: HTML file or `-`.
/// - `output`: Output file, stdout when `None`.
///
/// # Errors
/// - Returns `Err` when the input cannot be read or the output cannot be written.
pub async fn handle_toggle(ctx: &PageContext, file: &Path, output: Option<&Path>) -> Result<()> {
    let mut ctl = ctx.controller(Document::parse(&read_input(file)?));
    if let Some(initial) = ctl.initialize().await {
        report(&initial);
    }
    let outcome = ctl.toggle().await;
    report(&outcome);
    write_output(output, &ctl.document().to_html())
}

/// Print a one-line transition summary to stderr.
fn report(outcome: &ToggleOutcome) {
    if outcome.switched {
        eprintln!(
            "{}: {} unit(s) via {}",
            outcome.language, outcome.units, outcome.tier
        );
    } else {
        eprintln!(
            "{}: no translation available, page left unchanged ({} unit(s))",
            outcome.language, outcome.units
        );
    }
}
