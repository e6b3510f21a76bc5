//! Subcommands and their rendering.
//!
//! Each subcommand corresponds to one page of the hospital front-end. Plain
//! queries print the `response` payload as pretty JSON; the queue report goes
//! through the session's cached store and renders one line per booking.

use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use bpjs_core::{
    format::{format_date_indo, format_timestamp},
    CancelQueue, ControlFilter, Record, ServiceType, Session, Transport,
};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "bpjs", about = "Query the BPJS proxy: participants, visits, control plans, queue reports")]
pub struct Cli {
    /// Config file; defaults to ./bpjs.toml when present.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Overrides the configured proxy base URL.
    #[arg(long)]
    pub base_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Participant lookup by NIK for a SEP date.
    Peserta { nik: String, tgl_sep: String },
    /// Visits on a date; `jenis` is 1/inap or 2/jalan.
    Monitoring { tgl: String, jenis: ServiceType },
    /// Service history of a card number over a date range.
    Histori {
        no_kartu: String,
        mulai: String,
        akhir: String,
    },
    /// Control-visit schedules.
    Kontrol {
        #[command(subcommand)]
        by: KontrolBy,
    },
    /// Queue report for a date range, cached per session.
    Laporan {
        awal: String,
        akhir: String,
        /// Bypass the cached result.
        #[arg(long)]
        force: bool,
    },
    /// Cancel a queue booking.
    Batal {
        kodebooking: String,
        keterangan: String,
    },
    /// List doctors, or resolve one code to a name.
    Dokter { kode: Option<String> },
    /// Read commands from stdin, one per line, sharing one session cache.
    Shell,
}

#[derive(Subcommand, Debug, Clone)]
pub enum KontrolBy {
    /// By card number for a month; `filter` is 1/entri or 2/kontrol.
    Kartu {
        bulan: String,
        tahun: String,
        no_kartu: String,
        filter: ControlFilter,
    },
    /// By date range; `filter` is 1/entri or 2/kontrol.
    Tanggal {
        awal: String,
        akhir: String,
        filter: ControlFilter,
    },
}

/// One line of shell input.
#[derive(Parser, Debug)]
#[command(name = "bpjs", no_binary_name = true)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

pub async fn run<T: Transport>(session: &Session<T>, command: Command, out: &mut impl Write) -> Result<()> {
    let api = session.api();
    match command {
        Command::Peserta { nik, tgl_sep } => {
            print_json(out, &api.get_participant(&nik, &tgl_sep).await?)?;
        }
        Command::Monitoring { tgl, jenis } => {
            print_json(out, &api.monitoring_visits(&tgl, jenis).await?)?;
        }
        Command::Histori {
            no_kartu,
            mulai,
            akhir,
        } => {
            print_json(out, &api.visit_history(&no_kartu, &mulai, &akhir).await?)?;
        }
        Command::Kontrol { by } => {
            let payload = match by {
                KontrolBy::Kartu {
                    bulan,
                    tahun,
                    no_kartu,
                    filter,
                } => api.control_plans_by_card(&bulan, &tahun, &no_kartu, filter).await?,
                KontrolBy::Tanggal {
                    awal,
                    akhir,
                    filter,
                } => api.control_plans_by_date(&awal, &akhir, filter).await?,
            };
            print_json(out, &payload)?;
        }
        Command::Laporan { awal, akhir, force } => {
            report(session, &awal, &akhir, force, out).await?;
        }
        Command::Batal {
            kodebooking,
            keterangan,
        } => {
            let payload = api
                .cancel_queue(&CancelQueue {
                    kodebooking,
                    keterangan,
                })
                .await?;
            print_json(out, &payload)?;
        }
        Command::Dokter { kode } => {
            session.ensure_doctors().await?;
            match kode {
                Some(kode) => writeln!(out, "{}", session.doctor_name(&kode).await)?,
                None => {
                    let store = session.doctors();
                    let map = store.lookup_map().await;
                    for doctor in store.doctors().await {
                        let Some(code) = store.mapping().key_of(&doctor) else {
                            continue;
                        };
                        writeln!(out, "{code}\t{}", map.display_name(&code))?;
                    }
                }
            }
        }
        Command::Shell => bail!("shell cannot be nested"),
    }
    Ok(())
}

/// Run commands read from `input` against one session. Lines are split with
/// shell quoting rules, so `batal B1 "dokter cuti"` passes one reason. A
/// failing line is reported and the loop continues; blank lines and `#`
/// comments are skipped.
pub async fn run_shell<T: Transport>(
    session: &Session<T>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read shell input")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }
        let Some(words) = shlex::split(line) else {
            writeln!(out, "error: unbalanced quotes in '{line}'")?;
            continue;
        };
        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(err) => {
                writeln!(out, "{}", err.render())?;
                continue;
            }
        };
        if let Err(err) = run(session, parsed.command, out).await {
            writeln!(out, "error: {err:#}")?;
        }
    }
    Ok(())
}

async fn report<T: Transport>(
    session: &Session<T>,
    awal: &str,
    akhir: &str,
    force: bool,
    out: &mut impl Write,
) -> Result<()> {
    let state = session.fetch_report(awal, akhir, force).await;
    if let Some(error) = state.error {
        bail!("queue report failed: {error}");
    }

    if let Err(err) = session.ensure_doctors().await {
        warn!(error = %err, "doctor names unavailable, showing codes");
    }

    writeln!(
        out,
        "{} antrean, {} s/d {}",
        state.records.len(),
        format_date_indo(Some(awal)),
        format_date_indo(Some(akhir))
    )?;
    for row in &state.records {
        let name = session.doctor_name(text(row, "kodedokter")).await;
        writeln!(out, "{}", render_row(row, &name))?;
    }
    Ok(())
}

fn text<'a>(record: &'a Record, field: &str) -> &'a str {
    record.get(field).and_then(Value::as_str).unwrap_or_default()
}

fn render_row(row: &Record, doctor: &str) -> String {
    format!(
        "{} | {} | {} | {} | {} | dibuat {}",
        format_date_indo(Some(text(row, "tanggal"))),
        text(row, "kodebooking"),
        text(row, "kodepoli"),
        if doctor.is_empty() { "-" } else { doctor },
        text(row, "status"),
        format_timestamp(row.get("createdtime").unwrap_or(&Value::Null)),
    )
}

fn print_json(out: &mut impl Write, payload: &Value) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(payload)?)?;
    Ok(())
}
