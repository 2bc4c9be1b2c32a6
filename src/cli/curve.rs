use super::io::{load_cfg, CliErr, Sheet};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use leverage::{csv, plot, CurveCfg};
use std::path::{Path, PathBuf};

#[derive(clap::Args)]
pub(super) struct CurveArgs {
    /// Datasheet paths (in JSON format)
    files: Vec<PathBuf>,
    /// Pipeline config (in RON format), the options below override it
    #[clap(long)]
    cfg: Option<PathBuf>,
    /// Number of the points (resolution) of the quantized curve
    #[clap(long)]
    res: Option<usize>,
    /// Divide the curve by the average leverage ratio
    #[clap(long)]
    normalized: bool,
    /// Number of shock length steps across the stroke
    #[clap(long)]
    steps: Option<usize>,
    /// Also write the curve in CSV format beside the datasheet
    #[clap(long)]
    csv: bool,
    /// Write the corrected raw curve instead of the quantized one to CSV
    #[clap(long)]
    raw: bool,
    /// Also plot the curves in SVG format beside the datasheet
    #[clap(long)]
    svg: bool,
    /// Compute only, leave the datasheets untouched
    #[clap(long)]
    dry_run: bool,
    /// Process the files one by one
    #[clap(long)]
    no_parallel: bool,
}

/// Side outputs of a curve run.
struct Output {
    csv: bool,
    raw: bool,
    svg: bool,
    dry_run: bool,
}

pub(super) fn curve(args: CurveArgs) -> bool {
    let CurveArgs { files, cfg, res, normalized, steps, csv, raw, svg, dry_run, no_parallel } =
        args;
    let mut cfg = match load_cfg(cfg.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("{e}");
            return false;
        }
    };
    if let Some(res) = res {
        cfg = cfg.res(res);
    }
    if let Some(steps) = steps {
        cfg.sim = cfg.sim.steps(steps);
    }
    if normalized {
        cfg = cfg.normalized(true);
    }
    tracing::info!(
        "res={}, steps={}, normalized={}",
        cfg.res,
        cfg.sim.steps,
        cfg.normalized
    );
    let out = Output { csv, raw, svg, dry_run };
    let mpb = MultiProgress::new();
    let run = |file: PathBuf| run(&mpb, &file, &cfg, &out);
    let t0 = std::time::Instant::now();
    let failed = if no_parallel {
        files.into_iter().map(run).filter(|ok| !ok).count()
    } else {
        use rayon::prelude::*;
        files.into_par_iter().map(run).filter(|ok| !ok).count()
    };
    tracing::info!("time spent: {:?}", t0.elapsed());
    failed == 0
}

fn run(mpb: &MultiProgress, file: &Path, cfg: &CurveCfg, out: &Output) -> bool {
    const STYLE: &str = "[{prefix}] {elapsed_precise} {wide_bar} {pos}/{len} {msg}";
    let pb = mpb.add(ProgressBar::new(cfg.sim.steps as u64));
    if let Ok(style) = ProgressStyle::with_template(STYLE) {
        pb.set_style(style);
    }
    pb.set_prefix(file.display().to_string());
    let f = || -> Result<(), CliErr> {
        let mut sheet = Sheet::load(file)?;
        let mech = &sheet.mech;
        let raw = mech.corrected_curve_with(cfg, |i| pb.set_position(i as u64))?;
        let curve = mech.leverage_curve_from(&raw, cfg)?;
        if out.csv {
            let s = csv::dump_csv(if out.raw { &raw } else { &curve }).map_err(CliErr::Csv)?;
            std::fs::write(sheet.sibling("leverage.csv"), s)?;
        }
        if out.svg {
            let path = sheet.sibling("leverage.svg");
            let svg = plot::SVGBackend::new(&path, (800, 600));
            let title = format!("{} Leverage Ratio", sheet.title);
            let curves = [("Raw", &raw[..]), ("Quantized", &curve[..])];
            plot::plot_curve(svg, &title, &curves).map_err(|e| CliErr::Plot(e.into()))?;
        }
        if !out.dry_run {
            sheet.store_curve(&curve)?;
        }
        let ys = curve.iter().map(|[_, y]| format!("{y:.04}")).collect::<Vec<_>>();
        pb.finish_with_message(format!("| {}", ys.join(", ")));
        Ok(())
    };
    match f() {
        Ok(()) => true,
        Err(e) => {
            pb.abandon_with_message(format!("| error: {e}"));
            false
        }
    }
}
