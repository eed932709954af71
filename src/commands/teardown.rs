//! Resource group teardown
//!
//! Deleting the group cascades to every resource beneath it. This always
//! runs at the end of a walkthrough, whatever happened before; a group that
//! was never created is a benign no-op, and any other deletion failure is
//! logged without failing the run.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::cloud::{AppServiceApi, ArmClient};
use crate::config::Credentials;
use crate::error::{CloudApiError, DeployError};
use crate::ui;

/// CLI entry point: delete a group left behind by an earlier `run --keep`.
pub async fn execute(name: &str) -> Result<(), DeployError> {
    let creds = Credentials::load()?;
    let api = ArmClient::connect(&creds).await?;
    delete_group(&api, name).await;
    Ok(())
}

/// Delete `name` and everything in it. Never fails the caller.
pub async fn delete_group(api: &dyn AppServiceApi, name: &str) {
    info!("🧹 Deleting resource group: {}", name);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Deleting {}...", name));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    match api.delete_resource_group(name).await {
        Ok(()) => {
            pb.finish_and_clear();
            ui::print_success(&format!("Deleted resource group: {}", name));
        }
        Err(CloudApiError::NotFound { .. }) => {
            pb.finish_and_clear();
            info!("Did not create any resources. No clean up is necessary");
        }
        Err(e) => {
            pb.finish_and_clear();
            ui::print_error(&format!(
                "Failed to delete resource group {} (non-fatal): {}",
                name, e
            ));
        }
    }
}
