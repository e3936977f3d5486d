use super::output::{print_display_token, print_profile};
use anyhow::Result;
use memberkit_application::ProfileUseCase;
use memberkit_core::Credential;

pub async fn run(
    usecase: &ProfileUseCase,
    credential: &Credential,
    wait_token: bool,
    json: bool,
) -> Result<()> {
    let outcome = usecase.load(credential).await?;
    if wait_token {
        outcome.wait_for_token().await;
    }

    if json {
        let view = usecase.view().await;
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let confirmed = usecase.confirmed().await;
    print_profile(&confirmed);
    print_display_token(&confirmed, usecase.display_token().await.as_deref());
    Ok(())
}
