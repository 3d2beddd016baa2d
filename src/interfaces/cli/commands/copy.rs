//! Copy link command

use crate::app::App;
use crate::interfaces::cli::{CliError, print_notification};

/// Copy recent link `index` (1-based) to the clipboard
pub fn copy_link(app: &mut App, index: usize) -> Result<(), CliError> {
    if index == 0 || index > app.recent().len() {
        return Err(CliError::CommandError(format!(
            "No recent link #{} ({} available)",
            index,
            app.recent().len()
        )));
    }

    app.copy_recent(index - 1)?;
    print_notification(app);
    Ok(())
}
