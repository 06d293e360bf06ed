//! Preference command.

use inplace_translator::prefs::Theme;

use crate::args::page::PageContext;
use crate::args::utils::Result;

/// What: Show or update the saved preferences.
///
/// Inputs:
/// - `ctx`: Settings and preference file.
/// - `language`: New displayed language, if given.
/// - `theme`: New theme, if given.
///
/// Output:
/// - Prints `language` and `theme` after applying updates.
///
/// # Errors
/// - Returns `Err` when an update could not be persisted.
pub fn handle_prefs(ctx: &PageContext, language: Option<&str>, theme: Option<Theme>) -> Result<()> {
    let mut store = ctx.preferences();
    if let Some(lang) = language {
        let lang = lang.trim();
        if !inplace_translator::config::is_valid_language_code(lang) {
            return Err(format!("invalid language code {lang:?}").into());
        }
        if !store.save_language(lang) {
            return Err(format!("could not save language to {}", ctx.prefs_path.display()).into());
        }
    }
    if let Some(theme) = theme
        && !store.save_theme(theme)
    {
        return Err(format!("could not save theme to {}", ctx.prefs_path.display()).into());
    }
    let pref = store.load();
    println!("language = {}", pref.language);
    println!("theme = {}", pref.theme);
    Ok(())
}
