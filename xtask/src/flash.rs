use anyhow::{Context, Result};
use colored::Colorize;
use platform::config::APP_NAME;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

const TARGET: &str = "thumbv7em-none-eabihf";
const CHIP: &str = "STM32H743ZITx";

fn elf_path(release: bool) -> PathBuf {
    let profile = if release { "release" } else { "debug" };
    ["target", TARGET, profile, "firmware"].iter().collect()
}

pub fn run(release: bool) -> Result<()> {
    let mode = if release { "release" } else { "debug" };

    println!();
    println!("{}", format!("🔨 Building {APP_NAME} firmware ({mode} mode)...").cyan().bold());
    println!();

    let build_start = Instant::now();
    let mut build = Command::new("cargo");
    build.args(["build", "-p", "firmware", "--target", TARGET, "--features", "hardware"]);
    if release {
        build.arg("--release");
    }
    let output = build.output().context("Failed to run cargo build")?;
    if !output.status.success() {
        eprintln!("{}", "✗ Build failed".red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("Build failed");
    }
    println!(
        "{}",
        format!("✓ Build successful in {:.2}s", build_start.elapsed().as_secs_f64()).green()
    );
    println!();

    let elf = elf_path(release);
    show_binary_size(&elf);

    // probe-rs run flashes, resets and then streams defmt until Ctrl+C
    println!("{}", format!("📡 Flashing {CHIP}...").cyan().bold());
    println!(
        "   {}",
        "Startup blink, then one RTT line per pass; Ctrl+C detaches".dimmed()
    );
    println!();

    let status = Command::new("probe-rs")
        .arg("run")
        .arg("--chip")
        .arg(CHIP)
        .arg(&elf)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .context("Failed to run probe-rs. Is probe-rs installed? (cargo install probe-rs-tools)")?;

    if !status.success() {
        anyhow::bail!("probe-rs exited with {status}; check the probe connection and board power");
    }
    Ok(())
}

/// Print section sizes if `rust-size` (cargo-binutils) is on PATH.
fn show_binary_size(elf: &Path) {
    let Ok(out) = Command::new("rust-size").arg("-A").arg(elf).output() else {
        return;
    };
    if !out.status.success() {
        return;
    }
    println!("{}", "📊 Binary size:".cyan());
    for line in String::from_utf8_lossy(&out.stdout).lines() {
        println!("   {}", line.dimmed());
    }
    println!();
}
