use super::io::{load_cfg, CliErr, Sheet};
use leverage::plot;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct PoseArgs {
    /// Datasheet path (in JSON format)
    file: PathBuf,
    /// Number of poses from full extension to full compression
    #[clap(long, default_value_t = 8)]
    frames: usize,
    /// Pipeline config (in RON format)
    #[clap(long)]
    cfg: Option<PathBuf>,
    /// Output path, default to the datasheet name with "pose.svg" suffix
    #[clap(short, long)]
    output: Option<PathBuf>,
}

pub(super) fn pose(args: PoseArgs) -> bool {
    let PoseArgs { file, frames, cfg, output } = args;
    let f = || -> Result<PathBuf, CliErr> {
        let cfg = load_cfg(cfg.as_deref())?;
        let sheet = Sheet::load(&file)?;
        let poses = sheet.mech.poses(frames, &cfg.solver)?;
        let path = output.unwrap_or_else(|| sheet.sibling("pose.svg"));
        let svg = plot::SVGBackend::new(&path, (800, 800));
        let title = format!("{} Travel", sheet.title);
        plot::plot_pose(svg, &title, &sheet.mech, &poses).map_err(|e| CliErr::Plot(e.into()))?;
        Ok(path)
    };
    match f() {
        Ok(path) => {
            tracing::info!("saved to {}", path.display());
            true
        }
        Err(e) => {
            tracing::error!("[{}] {e}", file.display());
            false
        }
    }
}
