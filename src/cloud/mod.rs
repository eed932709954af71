//! Cloud-provisioning layer
//!
//! One trait covers every management-API operation the walkthrough needs, so
//! the orchestration can run against the real ARM backend or an in-memory
//! recording backend in tests. The three SDK-generation variants of the
//! original sample collapse behind this single seam.

pub mod arm;
pub mod auth;
#[cfg(test)]
pub mod mock;
pub mod models;

pub use arm::ArmClient;
pub use models::{
    AppServicePlan, NewWebApp, PlanSku, ResourceGroup, SiteConfig, SourceControlBinding, WebApp,
    WebPackage,
};

use async_trait::async_trait;

use crate::error::CloudApiError;

/// Management-API operations used by the walkthrough.
///
/// All create operations have create-or-update semantics: calling twice with
/// the same name is not an error and returns the existing resource. Creates
/// that are long-running on the real backend are awaited to completion before
/// the call returns.
#[async_trait]
pub trait AppServiceApi: Send + Sync {
    /// Create or update a resource group.
    async fn create_resource_group(
        &self,
        name: &str,
        location: &str,
    ) -> Result<ResourceGroup, CloudApiError>;

    /// Create or update the shared hosting plan. Polled to completion.
    async fn create_app_service_plan(
        &self,
        group: &str,
        name: &str,
        location: &str,
        sku: &PlanSku,
    ) -> Result<AppServicePlan, CloudApiError>;

    /// Create or update a web app bound to an existing plan. Polled to
    /// completion. The plan must already be provisioned; sequencing is the
    /// caller's responsibility.
    async fn create_web_app(
        &self,
        group: &str,
        name: &str,
        params: &NewWebApp,
    ) -> Result<WebApp, CloudApiError>;

    /// Fetch the secret-bearing publish profile XML for a web app.
    async fn get_publish_profile(&self, group: &str, app: &str) -> Result<String, CloudApiError>;

    /// Declare a source-control binding on a web app (public repo pull or
    /// GitHub continuous integration).
    async fn set_source_control(
        &self,
        group: &str,
        app: &str,
        binding: &SourceControlBinding,
    ) -> Result<(), CloudApiError>;

    /// Instruct the platform to fetch and install a Web Deploy package.
    async fn deploy_web_package(
        &self,
        group: &str,
        app: &str,
        package: &WebPackage,
    ) -> Result<(), CloudApiError>;

    /// Delete a resource group and everything in it. Returns
    /// [`CloudApiError::NotFound`] if the group does not exist.
    async fn delete_resource_group(&self, name: &str) -> Result<(), CloudApiError>;
}
