//! Resource models exchanged with the management API
//!
//! These mirror the ARM wire shapes (camelCase / nested `properties`) but
//! only carry the fields the walkthrough actually reads or writes.

use serde::{Deserialize, Serialize};

/// Suffix of every web app's public hostname.
pub const HOST_SUFFIX: &str = ".azurewebsites.net";

/// Suffix of every web app's Kudu/SCM hostname (git remotes live here).
pub const SCM_SUFFIX: &str = ".scm.azurewebsites.net";

/// A provisioned resource group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGroup {
    pub name: String,
    pub location: String,
}

/// A provisioned app service plan, referenced by id from each web app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppServicePlan {
    pub id: String,
    pub name: String,
    pub location: String,
}

/// Pricing tier for the shared plan. The walkthrough always uses Standard S1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSku {
    pub name: String,
    pub tier: String,
}

impl Default for PlanSku {
    fn default() -> Self {
        Self {
            name: "S1".to_string(),
            tier: "Standard".to_string(),
        }
    }
}

/// Site configuration for a web app. All fields optional; each of the five
/// apps sets a different subset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(rename = "netFrameworkVersion", skip_serializing_if = "Option::is_none")]
    pub net_framework_version: Option<String>,

    #[serde(rename = "javaVersion", skip_serializing_if = "Option::is_none")]
    pub java_version: Option<String>,

    #[serde(rename = "javaContainer", skip_serializing_if = "Option::is_none")]
    pub java_container: Option<String>,

    #[serde(rename = "javaContainerVersion", skip_serializing_if = "Option::is_none")]
    pub java_container_version: Option<String>,

    #[serde(rename = "windowsFxVersion", skip_serializing_if = "Option::is_none")]
    pub windows_fx_version: Option<String>,
}

impl SiteConfig {
    /// Java 8 on Tomcat 8.0, the stack the `helloworld.war` asset targets.
    pub fn java_tomcat() -> Self {
        Self {
            java_version: Some("1.8".to_string()),
            java_container: Some("TOMCAT".to_string()),
            java_container_version: Some("8.0".to_string()),
            ..Default::default()
        }
    }

    /// .NET Framework 4.6 on Windows.
    pub fn net_framework() -> Self {
        Self {
            net_framework_version: Some("v4.6".to_string()),
            ..Default::default()
        }
    }
}

/// Parameters for creating a web app.
#[derive(Debug, Clone)]
pub struct NewWebApp {
    pub location: String,
    /// Plan id is always passed explicitly; the plan is never reached through
    /// shared state.
    pub server_farm_id: String,
    pub site_config: SiteConfig,
}

/// A provisioned web app handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebApp {
    pub name: String,
    pub location: String,
    pub server_farm_id: String,
    pub default_hostname: String,
}

impl WebApp {
    /// Public URL of the site.
    pub fn url(&self) -> String {
        format!("http://{}", self.default_hostname)
    }

    /// Hostname of the site's SCM endpoint.
    pub fn scm_hostname(&self) -> String {
        format!("{}{}", self.name, SCM_SUFFIX)
    }
}

/// A source-control binding declared on a web app. The platform pulls the
/// content server-side; no local transfer happens for these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceControlBinding {
    pub repo_url: String,
    pub branch: String,
    /// `true` for a one-shot pull of a public repo; `false` turns on
    /// continuous integration (redeploy on every push).
    pub manual_integration: bool,
    /// Personal access token, required when `manual_integration` is false.
    pub access_token: Option<String>,
}

/// A Web Deploy package installation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebPackage {
    pub package_uri: String,
    pub delete_existing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_app_urls() {
        let app = WebApp {
            name: "webapp1-abc".to_string(),
            location: "eastus".to_string(),
            server_farm_id: "/plans/p".to_string(),
            default_hostname: format!("webapp1-abc{}", HOST_SUFFIX),
        };
        assert_eq!(app.url(), "http://webapp1-abc.azurewebsites.net");
        assert_eq!(app.scm_hostname(), "webapp1-abc.scm.azurewebsites.net");
    }

    #[test]
    fn test_site_config_serializes_only_set_fields() {
        let json = serde_json::to_string(&SiteConfig::java_tomcat()).unwrap();
        assert!(json.contains("javaVersion"));
        assert!(json.contains("javaContainerVersion"));
        assert!(!json.contains("netFrameworkVersion"));
        assert!(!json.contains("windowsFxVersion"));
    }

    #[test]
    fn test_default_sku_is_standard_s1() {
        let sku = PlanSku::default();
        assert_eq!(sku.name, "S1");
        assert_eq!(sku.tier, "Standard");
    }
}
