use super::io::Sheet;
use leverage::SolverCfg;
use std::path::PathBuf;

pub(super) fn check(files: Vec<PathBuf>) -> bool {
    let mut ok = true;
    for file in files {
        let sheet = match Sheet::load(&file) {
            Ok(sheet) => sheet,
            Err(e) => {
                println!("[{}] error: {e}", file.display());
                ok = false;
                continue;
            }
        };
        let mech = &sheet.mech;
        let p = mech.platform();
        let mut rest = p.clone();
        if let Err(e) = rest.solve(&SolverCfg::new()) {
            println!("[{}] error: {e}", file.display());
            ok = false;
            continue;
        }
        let params = mech.params();
        println!("[{}]", file.display());
        println!("joints={}, linkages={}", p.joints().len(), p.linkages().len());
        println!("axle={}", p.joint(mech.axle()).name);
        println!("shock={} ({:.04})", p.linkage(mech.shock()).name(), mech.shock_length());
        if let Some(shadow) = mech.shock_shadow() {
            println!("shock_shadow={}", p.linkage(shadow).name());
        }
        println!(
            "travel={}, eyetoeye={}, stroke={}, leverage={:.04}",
            params.travel,
            params.eye_to_eye,
            params.stroke,
            mech.avg_leverage()
        );
    }
    ok
}
