use super::output::print_display_token;
use anyhow::{Context, Result};
use colored::Colorize;
use memberkit_application::ProfileUseCase;
use memberkit_core::Credential;

/// How `--copy` behaves on this platform.
#[derive(Debug, Clone, Copy)]
pub struct CopyMode {
    /// The copy blocks until another application takes the clipboard.
    pub holds_clipboard: bool,
}

pub async fn run(
    usecase: &ProfileUseCase,
    credential: &Credential,
    copy: Option<CopyMode>,
) -> Result<()> {
    usecase.load(credential).await?.wait_for_token().await;
    usecase.toggle_token_panel().await;

    let confirmed = usecase.confirmed().await;
    let display_token = usecase
        .display_token()
        .await
        .context("Profile has no member ID; nothing to encode")?;
    print_display_token(&confirmed, Some(&display_token));

    if let Some(mode) = copy {
        if mode.holds_clipboard {
            println!(
                "📋 Keeping the code on the clipboard until something else is copied (Ctrl+C to stop)"
            );
        }
        match usecase.copy_token().await {
            Ok(confirmation) => println!("✅ {}", confirmation.message),
            // Non-fatal: the value was already printed above
            Err(e) => eprintln!("{} {}", "⚠".yellow(), e),
        }
    }

    Ok(())
}
