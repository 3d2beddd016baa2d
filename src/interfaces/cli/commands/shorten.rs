//! Shorten command

use colored::Colorize;

use crate::app::{App, ShortenForm};
use crate::interfaces::cli::{CliError, print_notification};

pub async fn shorten_url(
    app: &mut App,
    url: String,
    alias: Option<String>,
    expires: Option<String>,
    copy: bool,
) -> Result<(), CliError> {
    let form = ShortenForm {
        url,
        alias,
        expires_in_days: expires,
    };

    let outcome = app.submit(&form).await?;
    print_notification(app);

    let result = &outcome.result;
    if let Some(expires_at) = result.expires_at {
        println!(
            "  {} (expires: {})",
            result.short_url.cyan().bold(),
            expires_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
                .yellow()
        );
    } else {
        println!("  {}", result.short_url.cyan().bold());
    }

    if copy {
        app.copy_result()?;
        print_notification(app);
    }

    Ok(())
}
