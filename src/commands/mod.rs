//! Command runners
//!
//! Each runner returns the process exit code; errors propagate to `main`.

pub mod list;
pub mod publish;

use is_terminal::IsTerminal;

use gantry::infrastructure::IconSet;
use gantry::presentation::output::render_config_warning;
use gantry::presentation::Project;

/// Print configuration warnings to stderr, keeping stdout clean for JSON
fn print_config_warnings(project: &Project) {
    if project.warnings.is_empty() {
        return;
    }
    let icons = if std::io::stderr().is_terminal() {
        IconSet::UNICODE
    } else {
        IconSet::ASCII
    };
    for warning in &project.warnings {
        eprintln!("{}", render_config_warning(warning, icons));
    }
}
