use anyhow::{Context, bail};
use mesh_import_inspector::import_inspector::config::{load_selection, save_selection};
use mesh_import_inspector::import_inspector::panel::{SliderRanges, render_panel_text};
use mesh_import_inspector::import_inspector::reconcile::legal_tangent_mode;
use mesh_import_inspector::import_inspector::settings::OptionEnum;
use mesh_import_inspector::import_inspector::DEFAULT_SELECTION_PATH;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Args {
    selection: PathBuf,
    fix: Option<PathBuf>,
    dump: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = parse_args()?;
    let records = load_selection(&args.selection)
        .with_context(|| format!("failed to load {}", args.selection.display()))?;

    let mut fixed = records.clone();
    let mut offenders = 0_usize;
    for record in &mut fixed {
        let Some(next) = legal_tangent_mode(record) else {
            continue;
        };
        offenders += 1;
        println!(
            "{name}: tangents '{current}' not allowed with normals '{normal}' (would become '{next}')",
            name = record.name,
            current = record.tangent_mode.label(),
            normal = record.normal_mode.label(),
            next = next.label(),
        );
        record.tangent_mode = next;
    }
    info!(records = records.len(), offenders, "checked import selection");

    if args.dump {
        print!("{}", render_panel_text(records.clone(), &SliderRanges::default())?);
    }

    match args.fix {
        Some(out) if offenders > 0 => {
            save_selection(&out, &fixed)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Reconciled selection written to {}", out.display());
        }
        Some(_) => warn!("nothing to fix, no output written"),
        None if offenders > 0 => bail!("{offenders} record(s) have an illegal tangent mode"),
        None => println!("All {} record(s) consistent", records.len()),
    }

    Ok(())
}

fn parse_args() -> anyhow::Result<Args> {
    let mut selection = PathBuf::from(DEFAULT_SELECTION_PATH);
    let mut fix = None;
    let mut dump = false;

    let mut iter = env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--fix" => {
                let value = iter.next().context("--fix expects an output path")?;
                fix = Some(PathBuf::from(value));
            }
            "--dump" => dump = true,
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other if other.starts_with("--") => bail!("unknown argument: {other}"),
            other => selection = PathBuf::from(other),
        }
    }

    Ok(Args {
        selection,
        fix,
        dump,
    })
}

fn print_help() {
    println!(
        "Usage:\n\
         cargo run --bin import_check -- [selection.ron] [options]\n\n\
         Options:\n\
         --fix <path>   Write a copy with reconciled tangent modes\n\
         --dump         Print the inspector panel for the selection\n\
         \n\
         The selection defaults to {DEFAULT_SELECTION_PATH}."
    );
}
