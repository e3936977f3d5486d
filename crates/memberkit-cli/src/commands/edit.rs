use super::output::print_profile;
use anyhow::{Context, Result};
use colored::Colorize;
use memberkit_application::ProfileUseCase;
use memberkit_core::Credential;

/// Parses `FIELD=VALUE`. An empty value clears the field.
pub fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

pub async fn run(
    usecase: &ProfileUseCase,
    credential: &Credential,
    assignments: &[(String, String)],
) -> Result<()> {
    usecase.load(credential).await?;
    usecase.begin_edit().await?;

    for (key, value) in assignments {
        usecase
            .update_field_raw(key, Some(value.as_str()))
            .await
            .with_context(|| format!("Cannot set '{}'", key))?;
    }

    if let Err(e) = usecase.save(credential).await {
        let draft = usecase.draft().await;
        eprintln!("{} {}", "✗".red(), e);
        eprintln!("Unsaved changes:");
        print_profile(&draft);
        return Err(e.into());
    }

    println!("✅ Profile saved");
    print_profile(&usecase.confirmed().await);
    Ok(())
}
