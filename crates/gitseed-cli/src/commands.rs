use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use gitseed_setup::copy::INSTALL_HINT;
use gitseed_setup::{
    ExitStatus, GitConfig, RunObserver, SetupConfig, SetupRunner, StepKind, StepOutcome,
    StepRecord,
};
use gitseed_vcs::{GitCli, PathLocator, ToolLocator, VersionControl};

use crate::cli::Cli;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitStatus> {
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = match load_config(&cli.dir, cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            return Ok(ExitStatus::InvalidInput);
        }
    };

    let git = git_backend(&config.git);
    let status = run_setup(
        config,
        cli.dir,
        Arc::new(git),
        Arc::new(PathLocator::from_env()),
        &mut io::stdout(),
        &mut io::stderr(),
    )?;
    Ok(status)
}

/// Resolve the configuration for `dir`: the explicit file when given,
/// otherwise `<dir>/gitseed.toml` or the defaults.
fn load_config(dir: &Path, explicit: Option<&Path>) -> anyhow::Result<SetupConfig> {
    anyhow::ensure!(dir.is_dir(), "{} is not a directory", dir.display());
    let config = match explicit {
        Some(path) => SetupConfig::load(path),
        None => SetupConfig::discover(dir),
    }
    .context("loading configuration")?;
    Ok(config)
}

fn git_backend(config: &GitConfig) -> GitCli {
    let git = GitCli::new(&config.program);
    match (&config.author_name, &config.author_email) {
        (Some(name), Some(email)) => git.with_identity(name, email),
        _ => git,
    }
}

/// Run the pipeline and print progress, the outcome and, on success, the
/// publishing instructions.
fn run_setup(
    config: SetupConfig,
    dir: PathBuf,
    vcs: Arc<dyn VersionControl>,
    locator: Arc<dyn ToolLocator>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> io::Result<ExitStatus> {
    let title = config.project.display_name.clone();
    let runner = SetupRunner::with_default_steps(config, dir, vcs, locator);

    writeln!(out, "🚀 Setting up git repository for {}", title.bold())?;
    writeln!(out, "{}", "=".repeat(50))?;

    let mut observer = TerminalObserver::new(&mut *out);
    let report = runner.run_observed(&mut observer);
    observer.finish()?;

    match report.exit {
        ExitStatus::ToolMissing => {
            writeln!(err)?;
            writeln!(err, "{}", INSTALL_HINT.red())?;
        }
        ExitStatus::StepFailed => {
            writeln!(err)?;
            writeln!(
                err,
                "{} Setup stopped; fix the error above and run gitseed again.",
                "❌".red().bold()
            )?;
        }
        ExitStatus::Success => {
            let advisories = report.advisories().count();
            if advisories > 0 {
                writeln!(
                    out,
                    "{} {advisories} step(s) failed but were configured as advisory",
                    "⚠️ ".yellow()
                )?;
            }
            if let Some(instructions) = &report.instructions {
                writeln!(out)?;
                writeln!(out, "{instructions}")?;
            }
            writeln!(out)?;
            writeln!(out, "{} Local setup complete!", "🎉".bold())?;
        }
        // Decided before the runner exists.
        ExitStatus::InvalidInput => {}
    }

    Ok(report.exit)
}

/// Prints one line as each step starts and one as it finishes. The first
/// write error is kept and returned by [`TerminalObserver::finish`].
struct TerminalObserver<W> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> TerminalObserver<W> {
    fn new(out: W) -> Self {
        Self { out, error: None }
    }

    fn line(&mut self, text: &str) {
        if self.error.is_none() {
            if let Err(err) = writeln!(self.out, "{text}") {
                self.error = Some(err);
            }
        }
    }

    fn finish(self) -> io::Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<W: Write> RunObserver for TerminalObserver<W> {
    fn step_started(&mut self, kind: StepKind, name: &str) {
        self.line(&format!("{} {name}...", step_icon(kind)));
    }

    fn step_finished(&mut self, record: &StepRecord) {
        self.line(&outcome_line(&record.outcome));
    }
}

fn step_icon(kind: StepKind) -> &'static str {
    match kind {
        StepKind::Preflight => "🔎",
        StepKind::Init => "📁",
        StepKind::Stage => "📦",
        StepKind::Commit => "💾",
    }
}

fn outcome_line(outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Done { detail } => format!("   {} {}", "✅".green(), detail),
        StepOutcome::Skipped { reason } => format!("   {} {}", "ℹ️ ".cyan(), reason),
        StepOutcome::Failed {
            reason,
            fatal: true,
        } => format!("   {} {}", "❌".red().bold(), reason.red()),
        StepOutcome::Failed {
            reason,
            fatal: false,
        } => format!("   {} {}", "⚠️ ".yellow(), reason.yellow()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitseed_setup::copy::render_instructions;
    use gitseed_setup::{FailurePolicy, CONFIG_FILE_NAME};
    use gitseed_vcs::{InMemoryVcs, Operation, StaticLocator};

    fn project_dir() -> PathBuf {
        PathBuf::from("/home/dream/client_review")
    }

    fn seeded_vcs() -> Arc<InMemoryVcs> {
        let vcs = Arc::new(InMemoryVcs::new());
        vcs.write_file(&project_dir(), "README.md", "# Bible Mathematical Discovery");
        vcs.write_file(&project_dir(), "index.html", "<html></html>");
        vcs
    }

    struct Captured {
        status: ExitStatus,
        out: String,
        err: String,
    }

    fn run_in_memory(
        vcs: &Arc<InMemoryVcs>,
        locator: StaticLocator,
        config: SetupConfig,
    ) -> Captured {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = run_setup(
            config,
            project_dir(),
            vcs.clone(),
            Arc::new(locator),
            &mut out,
            &mut err,
        )
        .unwrap();
        Captured {
            status,
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
        }
    }

    fn git_found() -> StaticLocator {
        StaticLocator::found("/usr/bin/git")
    }

    fn cli_for(dir: &Path) -> Cli {
        Cli {
            dir: dir.to_path_buf(),
            config: None,
            verbose: false,
            no_color: false,
        }
    }

    // -----------------------------------------------------------------------
    // Exit codes and output at the process boundary
    // -----------------------------------------------------------------------
    #[test]
    fn missing_git_prints_hint_and_exits_one() {
        let vcs = seeded_vcs();
        let run = run_in_memory(&vcs, StaticLocator::missing(), SetupConfig::default());

        assert_eq!(run.status, ExitStatus::ToolMissing);
        assert_eq!(run.status.code(), 1);
        assert!(run.err.contains("Git is not installed"));
        assert!(run.out.contains("Checking for git"));
        assert!(!run.out.contains("git remote add"));
        assert!(!run.out.contains("Local setup complete"));
        assert!(vcs.calls().is_empty());
    }

    #[test]
    fn fatal_commit_failure_exits_two_without_instructions() {
        let vcs = seeded_vcs();
        vcs.fail_on(Operation::Commit);
        let run = run_in_memory(&vcs, git_found(), SetupConfig::default());

        assert_eq!(run.status, ExitStatus::StepFailed);
        assert_eq!(run.status.code(), 2);
        assert!(run.out.contains("injected failure for commit"));
        assert!(!run.out.contains("git remote add"));
        assert!(!run.out.contains("Local setup complete"));
        assert!(run.err.contains("Setup stopped"));
        assert!(!run.err.contains("Git is not installed"));
    }

    #[test]
    fn successful_run_prints_instructions() {
        let vcs = seeded_vcs();
        let config = SetupConfig::default();
        let expected = render_instructions(&config.project, &config.remote);
        let run = run_in_memory(&vcs, git_found(), config);

        assert_eq!(run.status, ExitStatus::Success);
        assert_eq!(run.status.code(), 0);
        assert!(run.out.contains(&expected));
        assert!(run.out.contains("Local setup complete"));
        assert!(run.err.is_empty());
        assert_eq!(vcs.commits(&project_dir()).len(), 1);
    }

    #[test]
    fn advisory_failures_are_counted() {
        let vcs = seeded_vcs();
        vcs.fail_on(Operation::AddAll);
        let config = SetupConfig {
            policy: FailurePolicy::lenient(),
            ..SetupConfig::default()
        };
        let run = run_in_memory(&vcs, git_found(), config);

        assert_eq!(run.status, ExitStatus::Success);
        assert!(run.out.contains("1 step(s) failed but were configured as advisory"));
        assert!(run.out.contains("git remote add"));
    }

    #[test]
    fn missing_directory_is_invalid_input() {
        let tmp = tempfile::tempdir().unwrap();
        let status = run_command(cli_for(&tmp.path().join("absent"))).unwrap();
        assert_eq!(status, ExitStatus::InvalidInput);
        assert_eq!(status.code(), 3);
    }

    #[test]
    fn bad_config_is_invalid_input() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[project]\nname = \"a b\"\n",
        )
        .unwrap();
        let status = run_command(cli_for(tmp.path())).unwrap();
        assert_eq!(status, ExitStatus::InvalidInput);
        assert!(!tmp.path().join(".git").exists());
    }

    #[test]
    fn explicit_config_must_exist() {
        let tmp = tempfile::tempdir().unwrap();
        let mut cli = cli_for(tmp.path());
        cli.config = Some(tmp.path().join("missing.toml"));
        assert_eq!(run_command(cli).unwrap(), ExitStatus::InvalidInput);
    }

    #[test]
    fn config_defaults_when_no_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config = load_config(tmp.path(), None).unwrap();
        assert_eq!(config, SetupConfig::default());
    }

    // -----------------------------------------------------------------------
    // Rendering helpers
    // -----------------------------------------------------------------------
    #[test]
    fn done_line_shows_detail() {
        let line = outcome_line(&StepOutcome::Done {
            detail: "git repository initialized".into(),
        });
        assert!(line.contains("git repository initialized"));
    }

    #[test]
    fn skipped_line_shows_reason() {
        let line = outcome_line(&StepOutcome::Skipped {
            reason: "no changes to commit".into(),
        });
        assert!(line.contains("no changes to commit"));
    }

    #[test]
    fn failure_lines_show_reason() {
        for fatal in [true, false] {
            let line = outcome_line(&StepOutcome::Failed {
                reason: "git add failed".into(),
                fatal,
            });
            assert!(line.contains("git add failed"));
        }
    }

    #[test]
    fn identity_applied_only_when_complete() {
        let config = GitConfig {
            program: "git".into(),
            author_name: Some("Researcher".into()),
            author_email: Some("research@biblemath.org".into()),
        };
        let git = git_backend(&config);
        let debug = format!("{git:?}");
        assert!(debug.contains("user.email"));

        let bare = git_backend(&GitConfig::default());
        assert!(!format!("{bare:?}").contains("user.name"));
    }

    #[test]
    fn every_step_has_an_icon() {
        for kind in StepKind::ALL {
            assert!(!step_icon(kind).is_empty());
        }
    }
}
