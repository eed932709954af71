//! ARM REST client
//!
//! Real implementation of [`AppServiceApi`] against the Azure Resource
//! Manager endpoint. Create-or-update maps to idempotent PUTs; long-running
//! operations are polled through the resource's `provisioningState` with a
//! bounded fixed-interval loop rather than an open-ended wait.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Credentials;
use crate::error::{AuthError, CloudApiError};

use super::models::{
    AppServicePlan, NewWebApp, PlanSku, ResourceGroup, SourceControlBinding, WebApp, WebPackage,
    HOST_SUFFIX,
};
use super::{auth, AppServiceApi};

const MANAGEMENT_ENDPOINT: &str = "https://management.azure.com";

const RESOURCE_API_VERSION: &str = "2021-04-01";
const WEB_API_VERSION: &str = "2023-12-01";

/// Provisioning polls: 20 attempts, 3 seconds apart.
const LRO_POLLS: u32 = 20;
const LRO_INTERVAL: Duration = Duration::from_secs(3);

/// Cascade deletes are slower; 60 attempts, 5 seconds apart.
const DELETE_POLLS: u32 = 60;
const DELETE_INTERVAL: Duration = Duration::from_secs(5);

/// Authenticated management-API client bound to one subscription.
pub struct ArmClient {
    client: reqwest::Client,
    subscription_id: String,
    token: String,
}

impl ArmClient {
    /// Authenticate and bind to the subscription named in `creds`.
    pub async fn connect(creds: &Credentials) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        let token = auth::acquire_token(&client, creds).await?;

        info!("Selected subscription: {}", creds.subscription_id);

        Ok(Self {
            client,
            subscription_id: creds.subscription_id.clone(),
            token,
        })
    }

    fn group_url(&self, name: &str) -> String {
        format!(
            "{}/subscriptions/{}/resourcegroups/{}?api-version={}",
            MANAGEMENT_ENDPOINT, self.subscription_id, name, RESOURCE_API_VERSION
        )
    }

    fn web_url(&self, group: &str, suffix: &str) -> String {
        format!(
            "{}/subscriptions/{}/resourceGroups/{}/providers/Microsoft.Web/{}?api-version={}",
            MANAGEMENT_ENDPOINT, self.subscription_id, group, suffix, WEB_API_VERSION
        )
    }

    async fn send_json(
        &self,
        request: reqwest::RequestBuilder,
        operation: &str,
        url: &str,
    ) -> Result<(reqwest::StatusCode, Value), CloudApiError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| CloudApiError::RequestFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CloudApiError::RequestFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !status.is_success() {
            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(CloudApiError::NotFound {
                    resource: operation.to_string(),
                });
            }
            return Err(CloudApiError::UnexpectedStatus {
                operation: operation.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body).map_err(|e| CloudApiError::MalformedResponse {
                operation: operation.to_string(),
                message: e.to_string(),
            })?
        };

        Ok((status, value))
    }

    /// Poll a resource URL until `properties.provisioningState` is terminal.
    async fn wait_for_provisioning(
        &self,
        url: &str,
        operation: &str,
    ) -> Result<Value, CloudApiError> {
        for poll in 1..=LRO_POLLS {
            let (_, body) = self
                .send_json(self.client.get(url), operation, url)
                .await?;

            let state = body
                .pointer("/properties/provisioningState")
                .and_then(Value::as_str)
                .unwrap_or("Succeeded");

            debug!("{}: provisioningState={} (poll {})", operation, state, poll);

            match state {
                "Succeeded" => return Ok(body),
                "Failed" | "Canceled" => {
                    return Err(CloudApiError::RequestFailed {
                        url: url.to_string(),
                        message: format!("{} ended in state {}", operation, state),
                    })
                }
                _ => tokio::time::sleep(LRO_INTERVAL).await,
            }
        }

        Err(CloudApiError::OperationTimedOut {
            operation: operation.to_string(),
            polls: LRO_POLLS,
        })
    }

    fn string_at<'a>(
        body: &'a Value,
        pointer: &str,
        operation: &str,
    ) -> Result<&'a str, CloudApiError> {
        body.pointer(pointer)
            .and_then(Value::as_str)
            .ok_or_else(|| CloudApiError::MalformedResponse {
                operation: operation.to_string(),
                message: format!("missing field {}", pointer),
            })
    }
}

#[async_trait]
impl AppServiceApi for ArmClient {
    async fn create_resource_group(
        &self,
        name: &str,
        location: &str,
    ) -> Result<ResourceGroup, CloudApiError> {
        let operation = format!("create resource group {}", name);
        let url = self.group_url(name);
        let body = json!({ "location": location });

        self.send_json(self.client.put(&url).json(&body), &operation, &url)
            .await?;

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
        sku: &PlanSku,
    ) -> Result<AppServicePlan, CloudApiError> {
        let operation = format!("create app service plan {}", name);
        let url = self.web_url(group, &format!("serverfarms/{}", name));
        let body = json!({
            "location": location,
            "sku": sku,
            "properties": {}
        });

        self.send_json(self.client.put(&url).json(&body), &operation, &url)
            .await?;
        let body = self.wait_for_provisioning(&url, &operation).await?;

        let id = Self::string_at(&body, "/id", &operation)?;
        Ok(AppServicePlan {
            id: id.to_string(),
            name: name.to_string(),
            location: location.to_string(),
        })
    }

    async fn create_web_app(
        &self,
        group: &str,
        name: &str,
        params: &NewWebApp,
    ) -> Result<WebApp, CloudApiError> {
        let operation = format!("create web app {}", name);
        let url = self.web_url(group, &format!("sites/{}", name));
        let body = json!({
            "location": &params.location,
            "properties": {
                "serverFarmId": &params.server_farm_id,
                "siteConfig": &params.site_config,
            }
        });

        self.send_json(self.client.put(&url).json(&body), &operation, &url)
            .await?;
        let body = self.wait_for_provisioning(&url, &operation).await?;

        let default_hostname = body
            .pointer("/properties/defaultHostName")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}{}", name, HOST_SUFFIX));

        Ok(WebApp {
            name: name.to_string(),
            location: params.location.clone(),
            server_farm_id: params.server_farm_id.clone(),
            default_hostname,
        })
    }

    async fn get_publish_profile(&self, group: &str, app: &str) -> Result<String, CloudApiError> {
        let operation = format!("fetch publish profile for {}", app);
        let url = self.web_url(group, &format!("sites/{}/publishxml", app));
        let body = json!({ "format": "Ftp" });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| CloudApiError::RequestFailed {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| CloudApiError::RequestFailed {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(CloudApiError::UnexpectedStatus {
                operation,
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }

    async fn set_source_control(
        &self,
        group: &str,
        app: &str,
        binding: &SourceControlBinding,
    ) -> Result<(), CloudApiError> {
        // Continuous integration needs the GitHub token registered with the
        // Web provider before the site binding is declared.
        if let Some(token) = &binding.access_token {
            let operation = "register GitHub access token".to_string();
            let url = format!(
                "{}/providers/Microsoft.Web/sourcecontrols/GitHub?api-version={}",
                MANAGEMENT_ENDPOINT, WEB_API_VERSION
            );
            let body = json!({ "properties": { "token": token } });
            self.send_json(self.client.put(&url).json(&body), &operation, &url)
                .await?;
        }

        let operation = format!("bind source control on {}", app);
        let url = self.web_url(group, &format!("sites/{}/sourcecontrols/web", app));
        let body = json!({
            "properties": {
                "repoUrl": &binding.repo_url,
                "branch": &binding.branch,
                "isManualIntegration": binding.manual_integration,
            }
        });

        self.send_json(self.client.put(&url).json(&body), &operation, &url)
            .await?;
        self.wait_for_provisioning(&url, &operation).await?;
        Ok(())
    }

    async fn deploy_web_package(
        &self,
        group: &str,
        app: &str,
        package: &WebPackage,
    ) -> Result<(), CloudApiError> {
        let operation = format!("web deploy to {}", app);
        let url = self.web_url(group, &format!("sites/{}/extensions/MSDeploy", app));
        let body = json!({
            "properties": {
                "packageUri": &package.package_uri,
                "dbType": "None",
                "connectionString": "",
                "appOffline": package.delete_existing,
                "skipAppData": !package.delete_existing,
            }
        });

        self.send_json(self.client.put(&url).json(&body), &operation, &url)
            .await?;
        self.wait_for_provisioning(&url, &operation).await?;
        Ok(())
    }

    async fn delete_resource_group(&self, name: &str) -> Result<(), CloudApiError> {
        let operation = format!("delete resource group {}", name);
        let url = self.group_url(name);

        self.send_json(self.client.delete(&url), &operation, &url)
            .await?;

        // Cascade deletion keeps running server-side; wait for the group to
        // actually disappear so a rerun with the same name starts clean.
        for poll in 1..=DELETE_POLLS {
            match self
                .send_json(self.client.get(&url), &operation, &url)
                .await
            {
                Err(CloudApiError::NotFound { .. }) => return Ok(()),
                Ok(_) => {
                    debug!("{}: still deleting (poll {})", operation, poll);
                    tokio::time::sleep(DELETE_INTERVAL).await;
                }
                Err(e) => return Err(e),
            }
        }

        Err(CloudApiError::OperationTimedOut {
            operation,
            polls: DELETE_POLLS,
        })
    }
}
