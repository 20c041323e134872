//! xtask emulate - run the host emulator
//!
//! Builds and runs `cargo run -p firmware --example emulator --features emulator`.
//! With `--watch` the run is repeated on every `.rs`/`.toml` change under the
//! firmware, playback and platform crates; a run still in progress is killed
//! first.

use anyhow::{Context, Result};
use colored::Colorize;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use platform::config;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::time::{Duration, Instant};

const WATCH_PATHS: [&str; 4] = [
    "crates/firmware/src",
    "crates/firmware/examples",
    "crates/playback/src",
    "crates/platform/src",
];

pub fn run(passes: u32, realtime: bool, watch: bool) -> Result<()> {
    print_banner();

    if !watch {
        let status = emulator_command(passes, realtime)
            .status()
            .context("Failed to run cargo")?;
        if !status.success() {
            anyhow::bail!("Emulator run failed");
        }
        return Ok(());
    }

    println!("{}", "Watching: firmware, playback, platform".dimmed());
    println!();

    let mut emulator = spawn_emulator(passes, realtime)?;

    let (tx, rx) = channel();
    let mut watcher: RecommendedWatcher = Watcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
                    && event.paths.iter().any(|p| {
                        p.extension()
                            .is_some_and(|ext| ext == "rs" || ext == "toml")
                    })
                {
                    let _ = tx.send(());
                }
            }
        },
        notify::Config::default(),
    )?;

    for path in WATCH_PATHS.iter().map(Path::new) {
        if path.exists() {
            watcher
                .watch(path, RecursiveMode::Recursive)
                .with_context(|| format!("Failed to watch path: {}", path.display()))?;
        }
    }

    println!("{}", "Press Ctrl+C to stop".dimmed());
    println!();

    let mut last_run = Instant::now();
    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(()) => {
                if last_run.elapsed() < Duration::from_millis(500) {
                    continue;
                }
                std::thread::sleep(Duration::from_millis(200));
                while rx.try_recv().is_ok() {}
                last_run = Instant::now();

                if let Some(mut child) = emulator.take() {
                    let _ = child.kill();
                    let _ = child.wait();
                }

                clear_screen();
                print_banner();
                println!("{}", "Changes detected - rerunning...".yellow().bold());

                match spawn_emulator(passes, realtime) {
                    Ok(child) => {
                        emulator = child;
                        #[cfg(feature = "notifications")]
                        {
                            let _ = notify_rust::Notification::new()
                                .summary(config::APP_NAME)
                                .body("Emulator restarted")
                                .timeout(2000)
                                .show();
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", format!("Build failed: {e}").red().bold());
                        println!("{}", "Fix errors and save to trigger a rerun".dimmed());
                    }
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Some(child) = emulator.as_mut() {
                    if let Ok(Some(status)) = child.try_wait() {
                        let code = status
                            .code()
                            .map_or_else(|| "signal".to_string(), |c| c.to_string());
                        let line = format!("Emulator exited ({code})");
                        if status.success() {
                            println!("{}", line.green());
                        } else {
                            println!("{}", line.yellow());
                        }
                        println!("{}", "Waiting for changes...".dimmed());
                        emulator = None;
                    }
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                eprintln!("Watcher stopped");
                break;
            }
        }
    }

    if let Some(mut child) = emulator {
        let _ = child.kill();
        let _ = child.wait();
    }
    Ok(())
}

fn emulator_command(passes: u32, realtime: bool) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args([
        "run",
        "-p",
        "firmware",
        "--example",
        "emulator",
        "--features",
        "emulator",
        "--",
    ])
    .arg(passes.to_string())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit());
    if realtime {
        cmd.arg("--realtime");
    }
    if std::env::var("RUST_LOG").is_err() {
        cmd.env("RUST_LOG", "info");
    }
    cmd
}

fn spawn_emulator(passes: u32, realtime: bool) -> Result<Option<Child>> {
    let child = emulator_command(passes, realtime)
        .spawn()
        .context("Failed to spawn emulator")?;
    Ok(Some(child))
}

fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
    io::stdout().flush().ok();
}

fn print_banner() {
    let banner_text = format!("     {} v{} - Emulator       ", config::APP_NAME, config::APP_VERSION);
    println!("{}", "═════════════════════════════════════════════".cyan());
    println!("{}", banner_text.cyan().bold());
    println!("{}", "═════════════════════════════════════════════".cyan());
    println!();
}
