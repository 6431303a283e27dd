//! Main workflow orchestration logic
//!
//! Resolves the manifest and ref, runs the transition and publishes the
//! result. Process state (environment variables, cwd) is captured once by the
//! caller into [`Environment`] so the workflow itself stays testable.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::domain::{TrackKind, Version};
use crate::transition::{transition, Flow};
use crate::ui::Reporter;
use crate::{git_ops, manifest, output};

/// Arguments for the run workflow
///
/// Mirrors the CLI Args; every field overrides the matching config value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunArgs {
    /// Manifest path relative to the workspace root
    pub path: Option<String>,

    /// Whether manifest discovery follows symlinked directories
    pub follow_symlinks: Option<bool>,

    /// Ref that triggered the run
    pub git_ref: Option<String>,

    /// Ref that designates the stable track
    pub stable_ref: Option<String>,

    /// Name of the published output
    pub output_name: Option<String>,

    /// Compute and log without publishing
    pub dry_run: bool,
}

/// Process context the workflow reads
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Environment {
    /// Workspace root (GITHUB_WORKSPACE), current directory when unset
    pub workspace: Option<PathBuf>,

    /// Triggering ref (GITHUB_REF)
    pub git_ref: Option<String>,

    /// Output file (GITHUB_OUTPUT)
    pub output_file: Option<PathBuf>,
}

impl Environment {
    /// Captures GITHUB_WORKSPACE, GITHUB_REF and GITHUB_OUTPUT; empty values count as unset.
    pub fn from_process() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.is_empty());

        Environment {
            workspace: var("GITHUB_WORKSPACE").map(PathBuf::from),
            git_ref: var("GITHUB_REF"),
            output_file: var("GITHUB_OUTPUT").map(PathBuf::from),
        }
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Manifest the version was read from
    pub manifest: PathBuf,

    /// Ref used to pick the track
    pub git_ref: String,

    pub track: TrackKind,

    pub flow: Flow,

    pub previous: Version,

    pub next: Version,

    /// Whether the output was published
    pub published: bool,
}

/// Parses the `follow-symlinks` input: anything but case-insensitive "false" is true.
pub fn parse_follow_symlinks(value: &str) -> bool {
    !value.trim().eq_ignore_ascii_case("false")
}

/// Main workflow
///
/// 1. Resolve the workspace root and the manifest inside it
/// 2. Read the current version from the manifest
/// 3. Resolve the triggering ref and classify the track
/// 4. Transition the version
/// 5. Publish the next version unless dry-run
///
/// Any failure aborts before publishing.
pub fn run_workflow(
    args: &RunArgs,
    config: &Config,
    env: &Environment,
    reporter: &Reporter,
) -> Result<RunResult> {
    let workspace = match &env.workspace {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    let mut manifest_config = config.manifest.clone();
    if let Some(follow) = args.follow_symlinks {
        manifest_config.follow_symlinks = follow;
    }
    let explicit_path = args.path.as_deref().or(manifest_config.path.as_deref());

    let manifest_path = manifest::resolve_manifest(&workspace, explicit_path, &manifest_config)
        .with_context(|| format!("Cannot locate manifest in {}", workspace.display()))?;
    reporter.status(&format!("Using manifest {}", manifest_path.display()));

    let current = manifest::read_version(&manifest_path)?;
    reporter.status(&format!("Old version {}", current));

    let git_ref = resolve_ref(args, env, &workspace)?;
    let stable_ref = args.stable_ref.as_deref().unwrap_or(&config.stable_ref);
    let track = TrackKind::from_ref(&git_ref, stable_ref);

    let version = Version::parse(&current)
        .with_context(|| format!("Invalid version in {}", manifest_path.display()))?;
    let step = transition(&version, track)?;
    reporter.flow(step.flow, track);

    let next = step.next.to_string();
    reporter.status(&format!("New version {}", next));
    reporter.version_change(&current, &next);

    let output_name = args.output_name.as_deref().unwrap_or(&config.output.name);
    let published = if args.dry_run {
        reporter.status(&format!("Dry run: not publishing {}", output_name));
        false
    } else {
        output::publish(output_name, &next, env.output_file.as_deref())?;
        reporter.success(&format!("Published {}={}", output_name, next));
        true
    };

    Ok(RunResult {
        manifest: manifest_path,
        git_ref,
        track,
        flow: step.flow,
        previous: step.previous,
        next: step.next,
        published,
    })
}

/// CLI ref, then environment ref, then the checked-out branch
fn resolve_ref(args: &RunArgs, env: &Environment, workspace: &Path) -> Result<String> {
    if let Some(git_ref) = args.git_ref.as_ref().or(env.git_ref.as_ref()) {
        return Ok(git_ref.clone());
    }
    git_ops::current_ref(workspace)
        .context("No ref given via --ref or GITHUB_REF and HEAD could not be resolved")
}
