// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! rds-cli - offline RDS-Spy log replay and pcap/RFtap capture.
//!
//! The `rds-core` decoding core has no I/O of its own; terminal UI,
//! argument parsing, and config loading all live outside it. This binary
//! is that collaborator for offline use: it owns the file handles, drives a
//! [`rds_core::source::LogFileSource`] or writes a
//! [`rds_core::pcap`] capture, and prints [`rds_core::Reporter`] snapshots.
//!
//! # Usage
//!
//! ```bash
//! # Replay a captured RDS-Spy log and print a final decode summary
//! rds-cli replay capture.log
//!
//! # Replay the same log into a Wireshark-readable RFtap pcap
//! rds-cli pcap capture.log capture.pcap --channel-khz 97500
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rds_core::config::DecoderConfig;
use rds_core::report::Reporter;
use rds_core::session::RdsSession;
use rds_core::source::{LogFileSource, SourceAdapter};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "rds-cli")]
#[command(author = "naskel.com")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Offline replay and pcap capture for the rds-core RDS/RBDS decoder")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose internal logging (rds-core's `debug!`/`trace!` output).
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Replay an RDS-Spy format log file and print a final decode summary.
    Replay {
        /// Path to a log file of `BBBB BBBB BBBB BBBB` lines.
        input: PathBuf,

        /// Bad-block correction threshold (default 2).
        #[arg(long, default_value_t = 2)]
        bad_block_threshold: u8,
    },
    /// Replay a log file into a synthetic RFtap pcap capture.
    Pcap {
        /// Path to a log file of `BBBB BBBB BBBB BBBB` lines.
        input: PathBuf,

        /// Output pcap file path.
        output: PathBuf,

        /// Tuned channel, in kHz, recorded in the RFtap nominal-frequency
        /// field.
        #[arg(long, default_value_t = 97_500)]
        channel_khz: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("rds_cli=debug,rds_core=debug")
    } else {
        EnvFilter::new("rds_cli=info,rds_core=warn")
    };
    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Command::Replay {
            input,
            bad_block_threshold,
        } => replay(&input, bad_block_threshold),
        Command::Pcap {
            input,
            output,
            channel_khz,
        } => capture_pcap(&input, &output, channel_khz),
    }
}

fn replay(input: &PathBuf, bad_block_threshold: u8) -> Result<()> {
    let file =
        File::open(input).with_context(|| format!("opening log file {}", input.display()))?;
    let mut source = LogFileSource::new(BufReader::new(file), 0);

    let config = DecoderConfig::new().with_bad_block_threshold(bad_block_threshold);
    let mut session = RdsSession::new(config);

    let mut fed = 0u64;
    let mut accepted = 0u64;
    while let Some(reading) = source
        .poll()
        .context("reading RDS-Spy log line")?
    {
        fed += 1;
        if session.feed(reading.blocks, reading.corrections).is_some() {
            accepted += 1;
        }
    }

    tracing::info!(fed, accepted, "replay complete");

    let cfg = *session.config();
    let report = Reporter::new(&session);
    print_summary(&report, &cfg, fed, accepted);
    Ok(())
}

fn print_summary(report: &Reporter<'_>, cfg: &DecoderConfig, fed: u64, accepted: u64) {
    println!("groups read:     {fed}");
    println!("groups accepted: {accepted}");
    println!("groups rejected: {}", report.rejected_count());
    println!("PS:    {:?}", report.ps());
    println!("RT:    {:?}", report.rt());
    println!("PTYN:  {:?}", report.ptyn());
    println!("TMCID: {:?}", report.tmcid());
    if let Some(clock) = report.clock() {
        println!("clock: {clock}");
    }
    if let Some((ta, ms)) = report.ta_ms() {
        println!("TA/MS: {ta}/{ms}");
    }
    if let Some((pty, (rds_name, rbds_name))) = report.pty() {
        println!("PTY:   {pty} ({rds_name} / {rbds_name})");
    }
    if let Some(pic) = report.pic_decomposition() {
        println!(
            "PIC:   country={:#x} area={:#x} ({}) program={:#x}",
            pic.country, pic.area, pic.area_descriptor, pic.program
        );
    }

    let mut stats = report.group_stats();
    stats.sort_by_key(|&(variant, _)| variant);
    if !stats.is_empty() {
        println!("group stats:");
        for (variant, count) in stats {
            println!("  {variant}: {count}");
        }
    }

    for (variant, _) in &stats {
        let freqs = report.alt_frequencies(*variant, cfg.af_display_fraction);
        if !freqs.is_empty() {
            println!("AF ({variant}):");
            for (label, count) in freqs {
                println!("  {label}: {count}");
            }
        }
    }

    let quickgroups = report.quickgroups(cfg.quickgroup_fraction);
    if !quickgroups.is_empty() {
        println!("quickgroups: {}", quickgroups.join(", "));
    }

    let bindings = report.oda_bindings(cfg.oda_display_fraction);
    if !bindings.is_empty() {
        println!("ODA bindings:");
        for (variant, aid, name) in bindings {
            let name = name.unwrap_or("unknown");
            println!("  {variant} -> {aid:#06x} ({name})");
        }
    }

    let tmc = report.tmc_records();
    if !tmc.is_empty() {
        println!("TMC records: {}", tmc.len());
        for record in tmc {
            println!(
                "  event={:#05x} location={:#06x} direction={} seen={}x",
                record.message.event, record.message.location, record.message.direction, record.count
            );
        }
    }
}

fn capture_pcap(input: &PathBuf, output: &PathBuf, channel_khz: u32) -> Result<()> {
    let in_file =
        File::open(input).with_context(|| format!("opening log file {}", input.display()))?;
    let mut source = LogFileSource::new(BufReader::new(in_file), channel_khz);

    let out_file = File::create(output)
        .with_context(|| format!("creating pcap file {}", output.display()))?;
    let mut writer = BufWriter::new(out_file);
    writer
        .write_all(&rds_core::pcap::global_header())
        .context("writing pcap global header")?;

    let nominal_freq_hz = f64::from(channel_khz) * 1000.0;
    let mut written = 0u64;
    while let Some(reading) = source
        .poll()
        .context("reading RDS-Spy log line")?
    {
        let timestamp = now_secs_usec();
        let record = rds_core::pcap::packet(reading.blocks, timestamp, nominal_freq_hz);
        writer
            .write_all(&record)
            .context("writing pcap packet record")?;
        written += 1;
    }
    writer.flush().context("flushing pcap file")?;

    tracing::info!(written, path = %output.display(), "pcap capture complete");
    println!("wrote {written} packet(s) to {}", output.display());
    Ok(())
}

fn now_secs_usec() -> (u32, u32) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() as u32, now.subsec_micros())
}
