//! Fixed output text.
//!
//! Everything a run prints besides per-step progress lives here, so the
//! pipeline code stays free of prose and the copy can be checked on its own.

use crate::config::{ProjectConfig, RemoteConfig};

/// Printed when the version-control executable is missing.
pub const INSTALL_HINT: &str = "❌ Git is not installed. Please install Git first:
   • Linux:   sudo apt install git   (or your distribution's package manager)
   • macOS:   xcode-select --install (or brew install git)
   • Windows: https://git-scm.com/download/win";

/// Message of the commit created on the first run.
pub const COMMIT_MESSAGE: &str = "🎉 Initial commit: Bible Mathematical Discovery Suite

✨ Features:
- 📖 Clean Hebrew Bible (Tanakh) downloader with verse-level text extraction
- 🔢 Hebrew Gematria calculation engine
- 📊 Statistical significance analysis of numerical patterns
- 🔍 Equidistant Letter Sequence (ELS) pattern detection
- 🎨 Interactive web interface with Hebrew letter highlighting
- ⚡ Real-time pattern exploration
- 🧪 Unit, performance and end-to-end test suites

🔬 Scientific proof of divine authorship through Hebrew Gematria analysis
📜 MIT licensed";

/// Feature checklist shown after the push commands.
pub const FEATURES: &[&str] = &[
    "Complete Hebrew Bible text (all 39 books of the Tanakh)",
    "Gematria values for every word and verse",
    "8,599 statistically significant numerical patterns",
    "ELS (Equidistant Letter Sequence) detection",
    "Hebrew letter highlighting web interface",
    "Statistical significance testing",
    "Comprehensive test coverage",
];

/// Follow-up actions once the repository is public.
pub const NEXT_STEPS: &[&str] = &[
    "Enable GitHub Pages: Settings → Pages → Deploy from branch",
    "Add topics: bible, gematria, hebrew, mathematics, statistics, tanakh",
    "Add a project description and website link in the About panel",
    "Create a first release (v1.0.0)",
    "Share the live demo link",
];

/// Render the publishing instructions.
///
/// The output depends only on the configuration, never on repository
/// state, so two runs with the same configuration print the same text.
pub fn render_instructions(project: &ProjectConfig, remote: &RemoteConfig) -> String {
    let owner = &remote.owner_placeholder;
    let repo = &project.name;
    let host = &remote.host;

    let mut lines = vec![
        format!("🌐 Create the repository on {host}"),
        "=".repeat(40),
        format!("1. Go to https://{host}/new"),
        format!("2. Repository name: {repo}"),
        format!("3. Description: {}", project.description),
        "4. Make it Public".to_string(),
        "5. Do NOT initialize with a README, .gitignore or license".to_string(),
        "6. Click \"Create repository\"".to_string(),
        String::new(),
        "📤 Then push your code:".to_string(),
        format!(
            "   git remote add {} https://{host}/{owner}/{repo}.git",
            remote.name
        ),
        format!("   git branch -M {}", remote.branch),
        format!("   git push -u {} {}", remote.name, remote.branch),
        String::new(),
        format!("   (replace {owner} with your {host} username)"),
        String::new(),
        "🔗 Your repository will be at:".to_string(),
        format!("   https://{host}/{owner}/{repo}"),
        String::new(),
        "✨ What's included:".to_string(),
    ];
    lines.extend(FEATURES.iter().map(|feature| format!("   ✅ {feature}")));
    lines.push(String::new());
    lines.push("🎯 Next steps:".to_string());
    lines.extend(NEXT_STEPS.iter().map(|step| format!("   □ {step}")));
    lines.push(String::new());
    lines.push("🌍 Live demo (after enabling Pages):".to_string());
    lines.push(format!("   https://{owner}.{}/{repo}", remote.pages_domain));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_default() -> String {
        render_instructions(&ProjectConfig::default(), &RemoteConfig::default())
    }

    #[test]
    fn push_commands_use_placeholder() {
        let text = render_default();
        assert!(text.contains(
            "git remote add origin https://github.com/YOUR_USERNAME/bible-mathematical-discovery.git"
        ));
        assert!(text.contains("git branch -M main"));
        assert!(text.contains("git push -u origin main"));
    }

    #[test]
    fn url_patterns() {
        let text = render_default();
        assert!(text.contains("https://github.com/YOUR_USERNAME/bible-mathematical-discovery\n"));
        assert!(text.ends_with("https://YOUR_USERNAME.github.io/bible-mathematical-discovery"));
    }

    #[test]
    fn lists_every_feature_and_step() {
        let text = render_default();
        for feature in FEATURES {
            assert!(text.contains(feature), "missing feature {feature}");
        }
        for step in NEXT_STEPS {
            assert!(text.contains(step), "missing step {step}");
        }
    }

    #[test]
    fn sections_appear_in_order() {
        let text = render_default();
        let headers = [
            "🌐 Create the repository on github.com",
            "📤 Then push your code:",
            "🔗 Your repository will be at:",
            "✨ What's included:",
            "🎯 Next steps:",
            "🌍 Live demo (after enabling Pages):",
        ];
        let positions: Vec<usize> = headers
            .iter()
            .map(|h| text.find(h).unwrap_or_else(|| panic!("missing header {h}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(text.starts_with(headers[0]));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render_default(), render_default());
    }

    #[test]
    fn custom_remote_is_interpolated() {
        let project = ProjectConfig {
            name: "gematria".into(),
            ..ProjectConfig::default()
        };
        let remote = RemoteConfig {
            host: "codeberg.org".into(),
            pages_domain: "codeberg.page".into(),
            name: "upstream".into(),
            branch: "trunk".into(),
            owner_placeholder: "<you>".into(),
        };
        let text = render_instructions(&project, &remote);
        assert!(text.contains("git remote add upstream https://codeberg.org/<you>/gematria.git"));
        assert!(text.contains("git push -u upstream trunk"));
        assert!(text.ends_with("https://<you>.codeberg.page/gematria"));
    }

    #[test]
    fn commit_message_has_no_comment_lines() {
        // git strips lines starting with '#' during message cleanup.
        assert!(COMMIT_MESSAGE.lines().all(|l| !l.starts_with('#')));
        assert!(COMMIT_MESSAGE.lines().next().unwrap().starts_with("🎉"));
    }
}
