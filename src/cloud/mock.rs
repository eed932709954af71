//! In-memory recording backend for orchestration tests
//!
//! Mirrors the create-or-update and cascade-delete semantics of the real
//! backend and records every call so tests can assert on exactly what the
//! walkthrough did.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::CloudApiError;

use super::models::{
    AppServicePlan, NewWebApp, PlanSku, ResourceGroup, SourceControlBinding, WebApp, WebPackage,
    HOST_SUFFIX,
};
use super::AppServiceApi;

#[derive(Default)]
struct MockState {
    groups: BTreeMap<String, String>,
    plans: BTreeMap<String, AppServicePlan>,
    apps: BTreeMap<String, WebApp>,
    source_controls: Vec<(String, SourceControlBinding)>,
    packages: Vec<(String, WebPackage)>,
    profile_fetches: Vec<String>,
    delete_calls: Vec<String>,
    fail_group_creates: BTreeSet<String>,
    fail_app_creates: BTreeSet<String>,
}

#[derive(Default)]
pub struct MockApi {
    state: Mutex<MockState>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create_web_app` for `name` fail, to exercise the
    /// abort-to-teardown path.
    pub fn fail_web_app_creation(&self, name: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_app_creates
            .insert(name.to_string());
    }

    /// Make the next `create_resource_group` for `name` fail, to simulate a
    /// bootstrap failure before anything exists.
    pub fn fail_group_creation(&self, name: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_group_creates
            .insert(name.to_string());
    }

    pub fn group_names(&self) -> Vec<String> {
        self.state.lock().unwrap().groups.keys().cloned().collect()
    }

    pub fn app_names(&self) -> Vec<String> {
        self.state.lock().unwrap().apps.keys().cloned().collect()
    }

    pub fn plan_names(&self) -> Vec<String> {
        self.state.lock().unwrap().plans.keys().cloned().collect()
    }

    pub fn source_controls(&self) -> Vec<(String, SourceControlBinding)> {
        self.state.lock().unwrap().source_controls.clone()
    }

    pub fn packages(&self) -> Vec<(String, WebPackage)> {
        self.state.lock().unwrap().packages.clone()
    }

    pub fn profile_fetches(&self) -> Vec<String> {
        self.state.lock().unwrap().profile_fetches.clone()
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().delete_calls.clone()
    }

    /// Publish profile XML in the shape the real backend returns.
    fn profile_xml(app: &str) -> String {
        format!(
            r#"<publishData>
  <publishProfile profileName="{app} - Web Deploy" publishMethod="MSDeploy" publishUrl="{app}.scm.azurewebsites.net:443" userName="${app}" userPWD="msdeploy-secret" destinationAppUrl="http://{app}.azurewebsites.net" />
  <publishProfile profileName="{app} - FTP" publishMethod="FTP" publishUrl="ftp://waws-prod-mock-001.ftp.azurewebsites.windows.net/site/wwwroot" ftpPassiveMode="True" userName="{app}\${app}" userPWD="ftp-secret" destinationAppUrl="http://{app}.azurewebsites.net" />
</publishData>"#,
            app = app
        )
    }
}

#[async_trait]
impl AppServiceApi for MockApi {
    async fn create_resource_group(
        &self,
        name: &str,
        location: &str,
    ) -> Result<ResourceGroup, CloudApiError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_group_creates.remove(name) {
            return Err(CloudApiError::UnexpectedStatus {
                operation: format!("create resource group {}", name),
                status: 403,
                body: "injected failure".to_string(),
            });
        }
        state
            .groups
            .insert(name.to_string(), location.to_string());
        Ok(ResourceGroup {
            name: name.to_string(),
            location: location.to_string(),
        })
    }

    async fn create_app_service_plan(
        &self,
        group: &str,
        name: &str,
        location: &str,
        _sku: &PlanSku,
    ) -> Result<AppServicePlan, CloudApiError> {
        let mut state = self.state.lock().unwrap();
        if !state.groups.contains_key(group) {
            return Err(CloudApiError::NotFound {
                resource: format!("resource group {}", group),
            });
        }
        let plan = AppServicePlan {
            id: format!(
                "/subscriptions/mock/resourceGroups/{}/providers/Microsoft.Web/serverfarms/{}",
                group, name
            ),
            name: name.to_string(),
            location: location.to_string(),
        };
        state.plans.insert(name.to_string(), plan.clone());
        Ok(plan)
    }

    async fn create_web_app(
        &self,
        group: &str,
        name: &str,
        params: &NewWebApp,
    ) -> Result<WebApp, CloudApiError> {
        let mut state = self.state.lock().unwrap();
        if !state.groups.contains_key(group) {
            return Err(CloudApiError::NotFound {
                resource: format!("resource group {}", group),
            });
        }
        if state.fail_app_creates.remove(name) {
            return Err(CloudApiError::UnexpectedStatus {
                operation: format!("create web app {}", name),
                status: 500,
                body: "injected failure".to_string(),
            });
        }
        if !state
            .plans
            .values()
            .any(|p| p.id == params.server_farm_id)
        {
            return Err(CloudApiError::NotFound {
                resource: format!("app service plan {}", params.server_farm_id),
            });
        }
        let app = WebApp {
            name: name.to_string(),
            location: params.location.clone(),
            server_farm_id: params.server_farm_id.clone(),
            default_hostname: format!("{}{}", name, HOST_SUFFIX),
        };
        state.apps.insert(name.to_string(), app.clone());
        Ok(app)
    }

    async fn get_publish_profile(&self, _group: &str, app: &str) -> Result<String, CloudApiError> {
        let mut state = self.state.lock().unwrap();
        if !state.apps.contains_key(app) {
            return Err(CloudApiError::NotFound {
                resource: format!("web app {}", app),
            });
        }
        state.profile_fetches.push(app.to_string());
        Ok(Self::profile_xml(app))
    }

    async fn set_source_control(
        &self,
        _group: &str,
        app: &str,
        binding: &SourceControlBinding,
    ) -> Result<(), CloudApiError> {
        let mut state = self.state.lock().unwrap();
        if !state.apps.contains_key(app) {
            return Err(CloudApiError::NotFound {
                resource: format!("web app {}", app),
            });
        }
        state
            .source_controls
            .push((app.to_string(), binding.clone()));
        Ok(())
    }

    async fn deploy_web_package(
        &self,
        _group: &str,
        app: &str,
        package: &WebPackage,
    ) -> Result<(), CloudApiError> {
        let mut state = self.state.lock().unwrap();
        if !state.apps.contains_key(app) {
            return Err(CloudApiError::NotFound {
                resource: format!("web app {}", app),
            });
        }
        state.packages.push((app.to_string(), package.clone()));
        Ok(())
    }

    async fn delete_resource_group(&self, name: &str) -> Result<(), CloudApiError> {
        let mut state = self.state.lock().unwrap();
        state.delete_calls.push(name.to_string());
        if state.groups.remove(name).is_none() {
            return Err(CloudApiError::NotFound {
                resource: format!("resource group {}", name),
            });
        }
        // Cascade: resources under the group go with it. The recorded call
        // lists stay intact; they are the audit trail tests assert on.
        state.plans.clear();
        state.apps.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::SiteConfig;

    #[test]
    fn test_create_resource_group_is_idempotent() {
        let api = MockApi::new();
        tokio_test::block_on(async {
            api.create_resource_group("rg-test", "eastus").await.unwrap();
            api.create_resource_group("rg-test", "eastus").await.unwrap();
        });
        assert_eq!(api.group_names(), vec!["rg-test".to_string()]);
    }

    #[tokio::test]
    async fn test_web_app_requires_provisioned_plan() {
        let api = MockApi::new();
        api.create_resource_group("rg-test", "eastus").await.unwrap();
        let err = api
            .create_web_app(
                "rg-test",
                "app1",
                &NewWebApp {
                    location: "eastus".to_string(),
                    server_farm_id: "/does/not/exist".to_string(),
                    site_config: SiteConfig::default(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CloudApiError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let api = MockApi::new();
        api.create_resource_group("rg-test", "eastus").await.unwrap();
        let plan = api
            .create_app_service_plan("rg-test", "plan-test", "eastus", &PlanSku::default())
            .await
            .unwrap();
        api.create_web_app(
            "rg-test",
            "app1",
            &NewWebApp {
                location: "eastus".to_string(),
                server_farm_id: plan.id.clone(),
                site_config: SiteConfig::default(),
            },
        )
        .await
        .unwrap();

        api.delete_resource_group("rg-test").await.unwrap();
        assert!(api.group_names().is_empty());
        assert!(api.app_names().is_empty());
        assert!(api.plan_names().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_group_is_not_found() {
        let api = MockApi::new();
        let err = api.delete_resource_group("rg-ghost").await.unwrap_err();
        assert!(matches!(err, CloudApiError::NotFound { .. }));
        assert_eq!(api.delete_calls(), vec!["rg-ghost".to_string()]);
    }
}
