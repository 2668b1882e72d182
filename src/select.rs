use dialoguer::console::Term;
use dialoguer::FuzzySelect;

use crate::error::{Error, Result};

/// The interactive list-picker capability: given ordered items, return the
/// selected index. Injected so the pipeline is testable without a terminal.
pub trait Picker {
    fn pick(&self, label: &str, items: &[String]) -> Result<usize>;
}

/// Terminal picker with a live search box active from the start. Rendered on
/// stderr so stdout stays clean for the session itself.
pub struct FuzzyPicker;

impl Picker for FuzzyPicker {
    fn pick(&self, label: &str, items: &[String]) -> Result<usize> {
        let selection = FuzzySelect::new()
            .with_prompt(label)
            .items(items)
            .default(0)
            .interact_on_opt(&Term::stderr())
            .map_err(|e| Error::SelectionCancelled(e.to_string()))?;

        selection.ok_or_else(|| Error::SelectionCancelled("aborted by operator".into()))
    }
}
