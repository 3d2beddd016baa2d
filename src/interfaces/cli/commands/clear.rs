//! Clear history command

use crate::app::App;
use crate::interfaces::cli::{CliError, print_notification};

pub fn clear_history(app: &mut App) -> Result<(), CliError> {
    app.clear_history()?;
    print_notification(app);
    Ok(())
}
