use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use codec::{MacAddress, Psid, WsmTxParams};
use dot3::{init_logging, Dot3, Dot3Config};
use dot3_tools::{build_wsm, decode_mpdu, format_decode_pretty, inspect_mpdu, parse_hex, InspectReport};
use glob::Pattern;

#[derive(Parser)]
#[command(
    name = "dot3-tools",
    version,
    about = "WAVE MPDU inspection, decoding and test-vector tools"
)]
struct Cli {
    /// Configuration file (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect MPDU structure and sizes.
    Inspect {
        /// Path to the MPDU bytes, or a directory of captures.
        mpdu_path: PathBuf,
        /// Optional glob filter when inspecting a directory.
        #[arg(long)]
        glob: Option<String>,
        /// Sort inspected MPDUs.
        #[arg(long, value_enum)]
        sort: Option<InspectSort>,
        /// Limit the number of inspected MPDUs (after sorting).
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Decode an MPDU into structured JSON.
    Decode {
        /// Path to the MPDU bytes.
        mpdu_file: PathBuf,
        /// Output format.
        #[arg(long, value_enum, default_value_t = DecodeFormat::Json)]
        format: DecodeFormat,
    },
    /// Build a WSM MPDU and write it to a file.
    BuildWsm {
        /// Output path.
        out: PathBuf,
        /// Provider service identifier.
        #[arg(long, value_parser = parse_psid)]
        psid: u32,
        /// Payload as hex digits.
        #[arg(long, default_value = "")]
        payload: String,
        #[arg(long, default_value = "ff:ff:ff:ff:ff:ff")]
        dest: MacAddress,
        #[arg(long, default_value = "00:00:00:00:00:00")]
        src: MacAddress,
        #[arg(long, default_value_t = 0)]
        priority: u8,
        #[arg(long)]
        channel: Option<u8>,
        /// Data rate in 500 kb/s units.
        #[arg(long)]
        data_rate: Option<u8>,
        /// Transmit power in dBm.
        #[arg(long, allow_hyphen_values = true)]
        tx_power: Option<i8>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InspectSort {
    Size,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DecodeFormat {
    Json,
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Dot3Config::load(path).context("load config")?,
        None => Dot3Config::default(),
    };
    init_logging(&config.logging).context("init logging")?;
    let dot3 = Dot3::new(&config).context("init dot3")?;

    match cli.command {
        Command::Inspect {
            mpdu_path,
            glob,
            sort,
            limit,
        } => {
            if mpdu_path.is_dir() {
                let entries = collect_mpdu_entries(&mpdu_path, glob.as_deref())?;
                let mut entries = maybe_sort_entries(entries, sort);
                let limit = limit.or(sort.map(|InspectSort::Size| 10));
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                for entry in entries {
                    let bytes = fs::read(&entry.path)
                        .with_context(|| format!("read MPDU {}", entry.path.display()))?;
                    println!("== {} ({} bytes) ==", entry.path.display(), entry.size);
                    match inspect_mpdu(&bytes, &dot3) {
                        Ok(report) => print_inspect_report(&report),
                        Err(err) => println!("error: {err:#}"),
                    }
                }
            } else {
                let bytes = fs::read(&mpdu_path)
                    .with_context(|| format!("read MPDU {}", mpdu_path.display()))?;
                let report = inspect_mpdu(&bytes, &dot3)?;
                print_inspect_report(&report);
            }
        }
        Command::Decode { mpdu_file, format } => {
            let bytes = fs::read(&mpdu_file)
                .with_context(|| format!("read MPDU {}", mpdu_file.display()))?;
            let output = decode_mpdu(&bytes, &dot3)?;
            match format {
                DecodeFormat::Json => {
                    let json = serde_json::to_string_pretty(&output).context("serialize json")?;
                    println!("{json}");
                }
                DecodeFormat::Pretty => {
                    print!("{}", format_decode_pretty(&output));
                }
            }
        }
        Command::BuildWsm {
            out,
            psid,
            payload,
            dest,
            src,
            priority,
            channel,
            data_rate,
            tx_power,
        } => {
            let payload = parse_hex(&payload).context("parse payload")?;
            let params = WsmTxParams {
                dest,
                src,
                priority,
                psid: Psid::new(psid),
                channel_number: channel,
                data_rate,
                tx_power,
                channel_load: None,
            };
            let mpdu = build_wsm(&dot3, &params, &payload)?;
            fs::write(&out, &mpdu).with_context(|| format!("write {}", out.display()))?;
            println!("wrote {} bytes to {}", mpdu.len(), out.display());
        }
    }
    Ok(())
}

/// Accepts decimal or `0x`-prefixed hex.
fn parse_psid(text: &str) -> Result<u32, String> {
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse(),
    };
    parsed.map_err(|err| format!("invalid PSID {text:?}: {err}"))
}

struct MpduEntry {
    path: PathBuf,
    size: u64,
}

fn collect_mpdu_entries(dir: &Path, glob: Option<&str>) -> Result<Vec<MpduEntry>> {
    let mut entries = Vec::new();
    let pattern = match glob {
        Some(value) => Some(Pattern::new(value).context("invalid glob pattern")?),
        None => None,
    };

    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let matches_path = pattern.matches_path(&path);
            let matches_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| pattern.matches(name));
            if !matches_path && !matches_name {
                continue;
            }
        }
        let size = entry.metadata()?.len();
        entries.push(MpduEntry { path, size });
    }
    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

fn maybe_sort_entries(mut entries: Vec<MpduEntry>, sort: Option<InspectSort>) -> Vec<MpduEntry> {
    match sort {
        Some(InspectSort::Size) => {
            entries.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
        None => {}
    }
    entries
}

fn print_inspect_report(report: &InspectReport) {
    let params = &report.params;
    println!(
        "{} -> {} priority {} WSMP v{} psid {}",
        params.src, params.dest, params.priority, params.version, params.psid
    );
    println!(
        "sizes: mpdu {} = envelope {} + wsmp header {} + body {}",
        report.mpdu_len, report.envelope_len, report.wsm_header_len, report.payload_len
    );
    let extensions: Vec<String> = [
        params.channel_number.map(|c| format!("channel {c}")),
        params.data_rate.map(|r| format!("rate {r}")),
        params.tx_power.map(|p| format!("power {p} dBm")),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !extensions.is_empty() {
        println!("extensions: {}", extensions.join(", "));
    }
    if let Some(wsa) = &report.wsa {
        println!(
            "WSA id {} content {}: {} services, {} channels{}",
            wsa.wsa_id,
            wsa.content_count,
            wsa.service_infos,
            wsa.channel_infos,
            if wsa.has_routing { ", routing" } else { "" }
        );
    }
}
