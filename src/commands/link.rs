//! The link command: requirements file in, managed directory out
//!
//! Steps, in order:
//! 1. parse the requirements file (includes expanded)
//! 2. resolve every entry against the installed packages
//! 3. collect the importable names of the resolved distributions
//! 4. rebuild the managed directory with one link per name
//! 5. make sure the bootstrap file imports the managed directory

use crate::bootstrap;
use crate::cli::Cli;
use crate::config::Settings;
use crate::error::{Result, manifest as manifest_err};
use crate::links::LinkSet;
use crate::manifest;
use crate::reconciler::{Reconciler, link};
use crate::registry::{SitePackages, discover_site_packages};
use crate::resolver::Resolver;
use crate::ui;

/// Run the link command
pub fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::resolve(cli)?;
    tracing::debug!(?settings, "resolved settings");

    if !settings.requirements.is_file() {
        return Err(manifest_err::not_found(
            settings.requirements.display().to_string(),
        ));
    }

    let manifest = manifest::parse(&settings.requirements)?;
    if manifest.is_empty() {
        ui::print_notice("Nothing to link: the requirements file lists no packages");
        return Ok(());
    }

    let root = discover_site_packages(settings.site_packages.as_deref())?;
    let registry = SitePackages::scan(&root)?;
    tracing::debug!(root = %root.display(), packages = registry.len(), "scanned package directory");

    let resolution = Resolver::new(&registry).resolve(&manifest);
    ui::print_issues(&resolution.issues);

    let targets = LinkSet::from_distributions(&resolution.distributions);
    if targets.is_empty() {
        ui::print_notice("Nothing to link: no installed package matched");
        return Ok(());
    }

    let linker = link::detect();
    tracing::debug!(linker = linker.name(), targets = targets.len(), "linking");
    let outcomes =
        Reconciler::new(registry.root(), linker.as_ref()).reconcile(&settings.lib_dir, &targets)?;
    ui::print_outcomes(&outcomes);

    let linked = outcomes.iter().any(|o| !o.is_skipped());
    if linked && !settings.no_import {
        let outcome = bootstrap::inject(&settings.bootstrap, &settings.lib_name)?;
        ui::print_bootstrap(outcome, &settings.bootstrap, &settings.lib_name);
    }

    Ok(())
}
