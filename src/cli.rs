//! CLI definitions for appsvc
//!
//! This module contains all CLI argument parsing structures using clap.

use clap::{Parser, Subcommand};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "appsvc",
    version,
    about = "Provisioning walkthrough for App Service web apps across deployment channels",
    long_about = "Provisions five web apps under one shared plan, deploys each through a \
                  different channel (FTP, local git, public repository, GitHub continuous \
                  integration, Web Deploy), warms them up, and tears everything down.\n\
                  Note: the local-git channel calls the system 'git' binary; it must be on PATH."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full walkthrough: provision, deploy five ways, warm up, tear down
    Run {
        /// Region to provision into
        #[arg(long, default_value = "eastus")]
        region: String,

        /// Local package uploaded over FTP to the first app
        #[arg(long, default_value = "Asset/helloworld.war")]
        asset: String,

        /// Local directory pushed with git to the second app
        #[arg(long, default_value = "Asset/helloworld-git")]
        git_source: String,

        /// Public repository pulled server-side into the third app
        #[arg(
            long,
            default_value = "https://github.com/Azure-Samples/app-service-web-dotnet-get-started"
        )]
        public_repo: String,

        /// Branch of the public repository
        #[arg(long, default_value = "master")]
        public_branch: String,

        /// Private GitHub repository bound to the fourth app with continuous
        /// integration; the binding is skipped when this is not provided
        #[arg(long)]
        github_repo: Option<String>,

        /// Branch of the private GitHub repository
        #[arg(long, default_value = "master")]
        github_branch: String,

        /// Personal access token for the continuous-integration binding
        #[arg(long, env = "GITHUB_TOKEN")]
        github_token: Option<String>,

        /// Web Deploy package installed on the fifth app
        #[arg(
            long,
            default_value = "https://github.com/Azure/azure-libraries-for-net/raw/master/Samples/Asset/webdeploy.zip"
        )]
        package_uri: String,

        /// Pause between the two warm-up probes
        #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
        warmup_delay: Duration,

        /// Skip the warm-up probes entirely
        #[arg(long)]
        skip_warmup: bool,

        /// Leave the resource group in place instead of tearing it down
        #[arg(long)]
        keep: bool,
    },

    /// Delete a resource group left behind by an earlier run
    Teardown {
        /// Name of the resource group to delete
        name: String,
    },
}
