//! The provisioning walkthrough
//!
//! One linear pass: resource group, shared plan, then five web apps, each
//! created, deployed through a different channel, and warmed up before the
//! next one starts. Teardown runs at the end on every path, whether the
//! provisioning phase succeeded, failed, or hit a missing git binary.
//!
//! The plan id is threaded through as an explicit parameter; no app reaches
//! the plan through shared state, and every app-creation result is bound to
//! its own handle.

use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::cloud::{
    AppServiceApi, ArmClient, NewWebApp, PlanSku, SiteConfig,
};
use crate::commands::teardown;
use crate::config::Credentials;
use crate::deploy::{self, DeploymentSource, LocalTransport, Transport};
use crate::error::{DeployError, FailureKind};
use crate::naming::random_name;
use crate::{ui, warmup};

pub struct RunOptions {
    pub region: String,
    /// Local package uploaded to app 1 over FTP.
    pub asset: PathBuf,
    /// Local directory pushed to app 2 with the system git.
    pub git_source: PathBuf,
    /// Public repository pulled server-side into app 3.
    pub public_repo: String,
    pub public_branch: String,
    /// Private repository bound to app 4 with continuous integration.
    /// Skipped (with a warning) when repo or token is absent.
    pub github_repo: Option<String>,
    pub github_branch: String,
    pub github_token: Option<String>,
    /// Web Deploy package installed on app 5.
    pub package_uri: String,
    pub warmup_delay: Duration,
    pub skip_warmup: bool,
    /// Leave the resource group in place for inspection.
    pub keep: bool,
}

/// Names for one walkthrough run. Randomized per run so concurrent
/// walkthroughs in the same subscription cannot collide.
pub struct WalkthroughNames {
    pub resource_group: String,
    pub plan: String,
    pub apps: [String; 5],
}

impl WalkthroughNames {
    pub fn generate() -> Self {
        Self {
            resource_group: random_name("rg-appsvc-", 24),
            plan: random_name("plan-", 20),
            apps: [
                random_name("webapp1-", 20),
                random_name("webapp2-", 20),
                random_name("webapp3-", 20),
                random_name("webapp4-", 20),
                random_name("webapp5-", 20),
            ],
        }
    }
}

/// One web app's worth of walkthrough: what to configure, how to deploy,
/// where to probe afterwards.
struct AppSpec {
    name: String,
    config: SiteConfig,
    source: Option<DeploymentSource>,
    warm_path: &'static str,
}

/// CLI entry point.
pub async fn execute(opts: RunOptions) -> Result<(), DeployError> {
    let creds = Credentials::load()?;
    let api = ArmClient::connect(&creds).await?;
    let names = WalkthroughNames::generate();
    run_walkthrough(&api, &LocalTransport, &names, &opts).await
}

/// Run the walkthrough against any backend. Teardown is guaranteed: it runs
/// whether the provisioning phase returned `Ok` or `Err` (unless `--keep`).
pub async fn run_walkthrough(
    api: &dyn AppServiceApi,
    transport: &dyn Transport,
    names: &WalkthroughNames,
    opts: &RunOptions,
) -> Result<(), DeployError> {
    ui::print_header("App Service deployment walkthrough");

    let outcome = provision_and_deploy(api, transport, names, opts).await;

    match &outcome {
        Ok(()) => ui::print_success("All five web apps provisioned and deployed"),
        Err(e) if e.kind() == FailureKind::TransportUnavailable => {
            // The error text carries the remediation hint.
            ui::print_warning(&e.to_string());
        }
        Err(e) => ui::print_error(&format!("Walkthrough aborted: {}", e)),
    }

    if opts.keep {
        ui::print_info(&format!(
            "Keeping resource group {} (teardown skipped)",
            names.resource_group
        ));
    } else {
        teardown::delete_group(api, &names.resource_group).await;
    }

    // A missing git binary is recognized and already reported; everything
    // else propagates to the caller after teardown.
    match outcome {
        Err(e) if e.kind() == FailureKind::TransportUnavailable => Ok(()),
        other => other,
    }
}

async fn provision_and_deploy(
    api: &dyn AppServiceApi,
    transport: &dyn Transport,
    names: &WalkthroughNames,
    opts: &RunOptions,
) -> Result<(), DeployError> {
    info!(
        "🏗️  Creating resource group {} in {}...",
        names.resource_group, opts.region
    );
    let group = api
        .create_resource_group(&names.resource_group, &opts.region)
        .await?;
    info!("   Created resource group {} in {}", group.name, group.location);

    info!("🏗️  Creating app service plan {}...", names.plan);
    let plan = api
        .create_app_service_plan(
            &names.resource_group,
            &names.plan,
            &opts.region,
            &PlanSku::default(),
        )
        .await?;
    info!("   Created app service plan {} in {}", plan.name, plan.location);

    let http = reqwest::Client::new();

    for spec in build_apps(names, opts) {
        info!(
            "🏗️  Creating web app {} in resource group {}...",
            spec.name, names.resource_group
        );
        let app = api
            .create_web_app(
                &names.resource_group,
                &spec.name,
                &NewWebApp {
                    location: opts.region.clone(),
                    server_farm_id: plan.id.clone(),
                    site_config: spec.config,
                },
            )
            .await?;
        ui::print_web_app(
            &app.name,
            &app.default_hostname,
            &app.location,
            &app.server_farm_id,
        );

        match &spec.source {
            Some(source) => {
                deploy::deploy(api, transport, &names.resource_group, &app, source).await?;
            }
            None => ui::print_warning(&format!(
                "No GitHub repository configured; skipping continuous-integration binding for {}",
                app.name
            )),
        }

        if !opts.skip_warmup {
            let url = format!("{}{}", app.url(), spec.warm_path);
            warmup::warm_up(&http, &url, opts.warmup_delay).await;
        }
    }

    Ok(())
}

/// The five apps, each with its own configuration and deployment channel.
fn build_apps(names: &WalkthroughNames, opts: &RunOptions) -> Vec<AppSpec> {
    let github_ci = match (&opts.github_repo, &opts.github_token) {
        (Some(repo), Some(token)) => Some(DeploymentSource::GitHubCi {
            repo_url: repo.clone(),
            branch: opts.github_branch.clone(),
            access_token: token.clone(),
        }),
        _ => None,
    };

    vec![
        AppSpec {
            name: names.apps[0].clone(),
            config: SiteConfig {
                net_framework_version: Some("v4.6".to_string()),
                ..SiteConfig::java_tomcat()
            },
            source: Some(DeploymentSource::Ftp {
                package: opts.asset.clone(),
            }),
            warm_path: "/helloworld",
        },
        AppSpec {
            name: names.apps[1].clone(),
            config: SiteConfig::java_tomcat(),
            source: Some(DeploymentSource::LocalGit {
                repo_dir: opts.git_source.clone(),
            }),
            warm_path: "/helloworld",
        },
        AppSpec {
            name: names.apps[2].clone(),
            config: SiteConfig::java_tomcat(),
            source: Some(DeploymentSource::PublicGit {
                repo_url: opts.public_repo.clone(),
                branch: opts.public_branch.clone(),
            }),
            warm_path: "",
        },
        AppSpec {
            name: names.apps[3].clone(),
            config: SiteConfig::default(),
            source: github_ci,
            warm_path: "",
        },
        AppSpec {
            name: names.apps[4].clone(),
            config: SiteConfig::net_framework(),
            source: Some(DeploymentSource::WebDeploy {
                package_uri: opts.package_uri.clone(),
                delete_existing: true,
            }),
            warm_path: "",
        },
    ]
}
