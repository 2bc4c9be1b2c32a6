use leverage::{CurveCfg, Datasheet, Mechanism};
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

/// Key of the quantized curve in the datasheet.
pub(super) const CURVE_KEY: &str = "leverage_curve";

#[derive(Debug)]
pub(super) enum CliErr {
    // Unsupported format
    Format(PathBuf),
    // Reading/writing file error
    Io(std::io::Error),
    // Datasheet serialization error
    Json(serde_json::Error),
    // Config serialization error
    Ron(ron::error::SpannedError),
    // CSV serialization error
    Csv(leverage::csv::Error),
    // Drawing error
    Plot(Box<dyn std::error::Error + Send + Sync>),
    // Invalid mechanism or unsolvable travel
    Kernel(leverage::Error),
}

impl std::fmt::Display for CliErr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Format(path) => write!(f, "unsupported format: {}", path.display()),
            Self::Io(e) => write!(f, "file error: {e}"),
            Self::Json(e) => write!(f, "json serialization error: {e}"),
            Self::Ron(e) => write!(f, "ron serialization error: {e}"),
            Self::Csv(e) => write!(f, "csv serialization error: {e}"),
            Self::Plot(e) => write!(f, "plot error: {e}"),
            Self::Kernel(e) => write!(f, "{e}"),
        }
    }
}

impl From<leverage::error::ValidationError> for CliErr {
    fn from(e: leverage::error::ValidationError) -> Self {
        Self::Kernel(e.into())
    }
}

impl From<leverage::Error> for CliErr {
    fn from(e: leverage::Error) -> Self {
        Self::Kernel(e)
    }
}

impl From<std::io::Error> for CliErr {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// A loaded datasheet, the document keeps the fields unknown to the solver.
#[derive(Debug)]
pub(super) struct Sheet {
    pub(super) path: PathBuf,
    pub(super) title: String,
    pub(super) doc: serde_json::Value,
    pub(super) mech: Mechanism,
}

impl Sheet {
    pub(super) fn load(path: &Path) -> Result<Self, CliErr> {
        if path.extension().and_then(OsStr::to_str) != Some("json") {
            return Err(CliErr::Format(path.to_path_buf()));
        }
        let s = std::fs::read_to_string(path)?;
        let doc = serde_json::from_str::<serde_json::Value>(&s).map_err(CliErr::Json)?;
        let data = serde_json::from_value::<Datasheet>(doc.clone()).map_err(CliErr::Json)?;
        let mech = Mechanism::from_datasheet(&data)?;
        let title = path
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
            .to_string();
        Ok(Self { path: path.to_path_buf(), title, doc, mech })
    }

    /// Write the leverage values back under [`CURVE_KEY`].
    pub(super) fn store_curve(&mut self, curve: &[[f64; 2]]) -> Result<(), CliErr> {
        let ys = curve.iter().map(|&[_, y]| y).collect::<Vec<_>>();
        let Some(map) = self.doc.as_object_mut() else {
            return Err(CliErr::Format(self.path.clone()));
        };
        map.insert(CURVE_KEY.to_string(), ys.into());
        let s = serde_json::to_string_pretty(&self.doc).map_err(CliErr::Json)?;
        std::fs::write(&self.path, s + "\n")?;
        Ok(())
    }

    /// A side output next to the datasheet.
    pub(super) fn sibling(&self, suffix: &str) -> PathBuf {
        self.path.with_file_name(format!("{}.{suffix}", self.title))
    }
}

/// Load the pipeline config from a RON file, default if absent.
pub(super) fn load_cfg(path: Option<&Path>) -> Result<CurveCfg, CliErr> {
    let Some(path) = path else { return Ok(CurveCfg::new()) };
    let s = std::fs::read_to_string(path)?;
    ron::from_str(&s).map_err(CliErr::Ron)
}
