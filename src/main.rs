// SPDX-License-Identifier: MIT
//
// n-diffview — render diff panels from git output.
//
// This is the binary that wires the crates together:
//
//   n-panels → builds a panel (files, log, options) from parsed git output
//   n-render → flattens the panel's component tree, constrains the cursor
//   n-host   → in-memory buffers and windows the panel renders into
//
// One run goes:
//
//   git output → parse → panel.set_entries → render → MemoryHost buffer
//   --moves    → constrain_window / toggle_at → window cursor
//   buffer     → paint → stdout
//
// Logging goes through `env_logger`; set RUST_LOG=debug to see render
// timings and constraint decisions.

mod paint;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};

use n_host::MemoryHost;
use n_panels::{
    FilePanel, LogPanel, OptionPanel, Panel, PanelConfig, PanelOption, parse_log, parse_porcelain,
};
use n_render::Host;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PanelKind {
    Files,
    Log,
    Options,
}

#[derive(Debug, Parser)]
#[command(name = "n-diffview", version, about = "Render diff panels from git output")]
struct Cli {
    /// Panel to show.
    #[arg(long, value_enum, default_value_t = PanelKind::Files)]
    panel: PanelKind,

    /// `git status --porcelain` output to read instead of running git.
    #[arg(long, value_name = "FILE")]
    status: Option<PathBuf>,

    /// `git log --oneline --name-status` output for the log panel.
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Panel config (TOML).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Cursor moves to replay: j/k step, g/G first/last, o toggles.
    #[arg(long, default_value = "")]
    moves: String,

    /// Panel width in columns, overriding the config.
    #[arg(long)]
    width: Option<usize>,

    /// Print plain text without ANSI colors.
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PanelConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PanelConfig::default(),
    };
    if let Some(width) = cli.width {
        config.width = width;
    }

    let mut host = MemoryHost::new();
    match cli.panel {
        PanelKind::Files => {
            let text = read_status(cli.status.as_deref())?;
            let entries = parse_porcelain(&text)?;
            let mut panel = FilePanel::new(&mut host, config.clone())?;
            panel.set_entries(entries)?;
            run(&mut host, panel, &cli, &config)
        }
        PanelKind::Log => {
            let path = cli
                .log
                .as_deref()
                .context("--panel log needs --log <FILE>")?;
            let text = read_file(path)?;
            let mut entries = parse_log(&text)?;
            if let Some(first) = entries.first_mut() {
                first.folded = false;
            }
            let mut panel = LogPanel::new(&mut host, config.clone())?;
            panel.set_entries(entries)?;
            run(&mut host, panel, &cli, &config)
        }
        PanelKind::Options => {
            let panel = OptionPanel::new(&mut host, default_options())?;
            run(&mut host, panel, &cli, &config)
        }
    }
}

/// Render `panel`, replay the moves, and paint the result.
fn run<P: Panel>(host: &mut MemoryHost, mut panel: P, cli: &Cli, config: &PanelConfig) -> Result<()> {
    let buffer = host.create_buffer(panel.name());
    panel.render(host, buffer)?;
    let window = host.open_window(buffer)?;
    host.set_cursor(window, panel.first_line())?;

    for key in cli.moves.chars() {
        let target = match key {
            'j' => panel.constraint().constrain_window(panel.tree(), &*host, window, 1)?,
            'k' => panel.constraint().constrain_window(panel.tree(), &*host, window, -1)?,
            'g' => panel.first_line(),
            'G' => panel.last_line(),
            'o' => {
                let line = host.cursor(window)?;
                if panel.toggle_at(line)? {
                    panel.render(host, buffer)?;
                }
                line
            }
            other => bail!("unknown move {other:?} (expected j, k, g, G, o)"),
        };
        let line = host.set_cursor(window, target)?;
        log::debug!("move {key:?}: cursor on line {line}");
    }

    let cursor = host.cursor(window)?;
    let buf = host.buffer(buffer).context("panel buffer is gone")?;
    paint::paint(&mut io::stdout().lock(), buf, config, Some(cursor), !cli.no_color)
        .context("writing panel to stdout")
}

fn read_status(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        return read_file(path);
    }
    let output = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .context("failed to run git")?;
    if !output.status.success() {
        bail!(
            "git status failed: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    String::from_utf8(output.stdout).context("git status output is not UTF-8")
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn default_options() -> Vec<PanelOption> {
    vec![
        PanelOption::flag("--cached", "Diff the index against the base", false),
        PanelOption::flag("--untracked-files", "List untracked files", true),
        PanelOption::flag("--ignore-all-space", "Ignore whitespace changes", false),
        PanelOption::text("--base", "Revision to compare against", "HEAD"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "n-diffview",
            "--panel",
            "log",
            "--log",
            "log.txt",
            "--moves",
            "jjo",
            "--width",
            "50",
            "--no-color",
        ])
        .unwrap();
        assert_eq!(cli.panel, PanelKind::Log);
        assert_eq!(cli.log.as_deref(), Some(Path::new("log.txt")));
        assert_eq!(cli.moves, "jjo");
        assert_eq!(cli.width, Some(50));
        assert!(cli.no_color);
    }

    #[test]
    fn cli_defaults_to_file_panel() {
        let cli = Cli::try_parse_from(["n-diffview"]).unwrap();
        assert_eq!(cli.panel, PanelKind::Files);
        assert!(cli.moves.is_empty());
        assert_eq!(cli.status, None);
    }

    #[test]
    fn replayed_moves_stay_on_rows() {
        let mut host = MemoryHost::new();
        let mut panel = FilePanel::new(&mut host, PanelConfig::default()).unwrap();
        panel
            .set_entries(parse_porcelain("MM a.rs\n?? b.rs\n").unwrap())
            .unwrap();
        let buffer = host.create_buffer(panel.name());
        panel.render(&mut host, buffer).unwrap();
        let window = host.open_window(buffer).unwrap();
        host.set_cursor(window, panel.first_line()).unwrap();

        // Rows: 3, 4 (working), 6 (staged).
        for (delta, expected) in [(1, 4), (1, 6), (1, 6), (-1, 4), (-1, 3), (-1, 3)] {
            let line = panel
                .constraint()
                .constrain_window(panel.tree(), &host, window, delta)
                .unwrap();
            host.set_cursor(window, line).unwrap();
            assert_eq!(line, expected);
        }
        assert_eq!(panel.item_at_line(6).map(|e| e.staged), Some(true));
    }

    #[test]
    fn default_options_render() {
        let mut host = MemoryHost::new();
        let mut panel = OptionPanel::new(&mut host, default_options()).unwrap();
        let buffer = host.create_buffer(panel.name());
        panel.render(&mut host, buffer).unwrap();
        assert_eq!(host.lines(buffer).len(), 1 + default_options().len());
        assert!(panel.toggle_at(2).unwrap());
    }
}
