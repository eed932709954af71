//! Deployment dispatcher
//!
//! Each web app carries exactly one [`DeploymentSource`]; `deploy` dispatches
//! to the matching strategy. Local transports (FTP, git) sit behind the
//! [`Transport`] trait so orchestration tests can record transfers without
//! touching the network. Server-side strategies (public repo pull, GitHub
//! continuous integration, Web Deploy) go straight through the management
//! API; no local transfer happens for those.

pub mod ftp;
pub mod git_push;

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::cloud::{AppServiceApi, SourceControlBinding, WebApp, WebPackage};
use crate::error::{DeployError, TransportError};
use crate::publish_profile::{GitRemote, PublishData, PublishProfile};

/// How one web app receives its content.
#[derive(Debug, Clone)]
pub enum DeploymentSource {
    /// Upload a local package over FTP using publish-profile credentials.
    Ftp { package: PathBuf },
    /// Push a local repository to the app's SCM endpoint with the system git.
    LocalGit { repo_dir: PathBuf },
    /// Platform pulls a public repository server-side; one-shot.
    PublicGit { repo_url: String, branch: String },
    /// Platform redeploys on every push to the bound GitHub repository.
    GitHubCi {
        repo_url: String,
        branch: String,
        access_token: String,
    },
    /// Platform fetches and installs a Web Deploy package from a URI.
    WebDeploy {
        package_uri: String,
        delete_existing: bool,
    },
}

/// Local content transports, separable from the orchestration for testing.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn upload_ftp(
        &self,
        profile: &PublishProfile,
        package: &Path,
    ) -> Result<(), TransportError>;

    async fn push_git(&self, remote: &GitRemote, repo_dir: &Path) -> Result<(), TransportError>;
}

/// Real transports: suppaftp session for uploads, system git for pushes.
pub struct LocalTransport;

#[async_trait]
impl Transport for LocalTransport {
    async fn upload_ftp(
        &self,
        profile: &PublishProfile,
        package: &Path,
    ) -> Result<(), TransportError> {
        ftp::upload(profile, package)
    }

    async fn push_git(&self, remote: &GitRemote, repo_dir: &Path) -> Result<(), TransportError> {
        git_push::push(remote, repo_dir)
    }
}

/// Push content to `app` using its declared source.
pub async fn deploy(
    api: &dyn AppServiceApi,
    transport: &dyn Transport,
    group: &str,
    app: &WebApp,
    source: &DeploymentSource,
) -> Result<(), DeployError> {
    match source {
        DeploymentSource::Ftp { package } => {
            info!(
                "📤 Deploying {} to {} through FTP...",
                package.display(),
                app.name
            );
            let xml = api.get_publish_profile(group, &app.name).await?;
            let data = PublishData::parse(&xml)?;
            let profile = data.ftp()?;
            transport.upload_ftp(profile, package).await?;
        }
        DeploymentSource::LocalGit { repo_dir } => {
            info!(
                "📤 Deploying {} to {} through a local git push...",
                repo_dir.display(),
                app.name
            );
            let xml = api.get_publish_profile(group, &app.name).await?;
            let data = PublishData::parse(&xml)?;
            let remote = data.git_remote(&app.name)?;
            info!("   Remote: {}", remote.redacted_url());
            transport.push_git(&remote, repo_dir).await?;
        }
        DeploymentSource::PublicGit { repo_url, branch } => {
            info!(
                "📤 Binding {} to public repository {} ({})...",
                app.name, repo_url, branch
            );
            let binding = SourceControlBinding {
                repo_url: repo_url.clone(),
                branch: branch.clone(),
                manual_integration: true,
                access_token: None,
            };
            api.set_source_control(group, &app.name, &binding).await?;
        }
        DeploymentSource::GitHubCi {
            repo_url,
            branch,
            access_token,
        } => {
            info!(
                "📤 Turning on continuous integration for {} from {} ({})...",
                app.name, repo_url, branch
            );
            let binding = SourceControlBinding {
                repo_url: repo_url.clone(),
                branch: branch.clone(),
                manual_integration: false,
                access_token: Some(access_token.clone()),
            };
            api.set_source_control(group, &app.name, &binding).await?;
        }
        DeploymentSource::WebDeploy {
            package_uri,
            delete_existing,
        } => {
            info!(
                "📤 Installing Web Deploy package on {} from {}...",
                app.name, package_uri
            );
            let package = WebPackage {
                package_uri: package_uri.clone(),
                delete_existing: *delete_existing,
            };
            api.deploy_web_package(group, &app.name, &package).await?;
        }
    }

    info!("   Deployment to web app {} completed", app.name);
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingTransport;
    use super::*;
    use crate::cloud::mock::MockApi;
    use crate::cloud::{NewWebApp, PlanSku, SiteConfig};

    async fn provisioned_app(api: &MockApi, name: &str) -> WebApp {
        api.create_resource_group("rg-test", "eastus").await.unwrap();
        let plan = api
            .create_app_service_plan("rg-test", "plan-test", "eastus", &PlanSku::default())
            .await
            .unwrap();
        api.create_web_app(
            "rg-test",
            name,
            &NewWebApp {
                location: "eastus".to_string(),
                server_farm_id: plan.id,
                site_config: SiteConfig::java_tomcat(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_ftp_dispatch_fetches_profile_and_uploads() {
        let api = MockApi::new();
        let transport = RecordingTransport::new();
        let app = provisioned_app(&api, "app1-test").await;

        deploy(
            &api,
            &transport,
            "rg-test",
            &app,
            &DeploymentSource::Ftp {
                package: PathBuf::from("Asset/helloworld.war"),
            },
        )
        .await
        .unwrap();

        assert_eq!(api.profile_fetches(), vec!["app1-test".to_string()]);
        let uploads = transport.ftp_uploads();
        assert_eq!(uploads.len(), 1);
        assert!(uploads[0].0.contains("app1-test.azurewebsites.net"));
        assert_eq!(uploads[0].1, PathBuf::from("Asset/helloworld.war"));
    }

    #[tokio::test]
    async fn test_public_git_dispatch_sets_manual_binding() {
        let api = MockApi::new();
        let transport = RecordingTransport::new();
        let app = provisioned_app(&api, "app3-test").await;

        deploy(
            &api,
            &transport,
            "rg-test",
            &app,
            &DeploymentSource::PublicGit {
                repo_url: "https://github.com/Azure-Samples/app-service-web-dotnet-get-started"
                    .to_string(),
                branch: "master".to_string(),
            },
        )
        .await
        .unwrap();

        let bindings = api.source_controls();
        assert_eq!(bindings.len(), 1);
        assert!(bindings[0].1.manual_integration);
        assert!(bindings[0].1.access_token.is_none());
    }

    #[tokio::test]
    async fn test_github_ci_dispatch_carries_token() {
        let api = MockApi::new();
        let transport = RecordingTransport::new();
        let app = provisioned_app(&api, "app4-test").await;

        deploy(
            &api,
            &transport,
            "rg-test",
            &app,
            &DeploymentSource::GitHubCi {
                repo_url: "https://github.com/someone/some-repo".to_string(),
                branch: "master".to_string(),
                access_token: "ghp_token".to_string(),
            },
        )
        .await
        .unwrap();

        let bindings = api.source_controls();
        assert_eq!(bindings.len(), 1);
        assert!(!bindings[0].1.manual_integration);
        assert_eq!(bindings[0].1.access_token.as_deref(), Some("ghp_token"));
    }

    #[tokio::test]
    async fn test_web_deploy_dispatch_records_package() {
        let api = MockApi::new();
        let transport = RecordingTransport::new();
        let app = provisioned_app(&api, "app5-test").await;

        deploy(
            &api,
            &transport,
            "rg-test",
            &app,
            &DeploymentSource::WebDeploy {
                package_uri: "https://example.org/webdeploy.zip".to_string(),
                delete_existing: true,
            },
        )
        .await
        .unwrap();

        let packages = api.packages();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].1.package_uri, "https://example.org/webdeploy.zip");
        assert!(packages[0].1.delete_existing);
    }
}
