//! The functions used to plot leverage curves and suspension poses.
use crate::Mechanism;
pub use plotters::{prelude::*, *};

/// Get font setting.
pub fn font() -> TextStyle<'static> {
    ("Times New Roman", 24).into_font().color(&BLACK)
}

/// Plot leverage curves over the wheel travel.
pub fn plot_curve<B>(backend: B, title: &str, curves: &[(&str, &[[f64; 2]])]) -> anyhow::Result<()>
where
    B: DrawingBackend,
    B::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    let pts = || curves.iter().flat_map(|(_, c)| c.iter());
    let x_max = pts().fold(0., |v: f64, [x, _]| v.max(*x));
    let y_min = pts().fold(f64::INFINITY, |v, [_, y]| v.min(*y));
    let y_max = pts().fold(-f64::INFINITY, |v, [_, y]| v.max(*y));
    anyhow::ensure!(y_min <= y_max, "no curve to plot");
    let pad = ((y_max - y_min) * 0.1).max(0.1);
    let mut chart = ChartBuilder::on(&root)
        .caption(title, font())
        .set_label_area_size(LabelAreaPosition::Left, (8).percent())
        .set_label_area_size(LabelAreaPosition::Bottom, (6).percent())
        .margin((8).percent())
        .build_cartesian_2d(0.0..x_max.max(f64::EPSILON), y_min - pad..y_max + pad)?;
    chart
        .configure_mesh()
        .x_desc("Wheel Travel")
        .x_label_style(font())
        .y_desc("Leverage Ratio")
        .y_label_style(font())
        .draw()?;
    for (i, &(label, curve)) in curves.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        chart
            .draw_series(LineSeries::new(curve.iter().map(|&[x, y]| (x, y)), &color))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        let dots = curve.iter().map(|&[x, y]| Circle::new((x, y), 3, color.filled()));
        chart.draw_series(dots)?;
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE)
        .border_style(&BLACK)
        .label_font(font())
        .draw()?;
    Ok(())
}

/// Plot the poses of a travel sweep, see [`Mechanism::poses`].
///
/// The first pose (full extension) is drawn in blue, the last one (full
/// compression) in red.
pub fn plot_pose<B>(backend: B, title: &str, mech: &Mechanism, poses: &[Vec<[f64; 2]>]) -> anyhow::Result<()>
where
    B: DrawingBackend,
    B::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&WHITE)?;
    let [x_min, x_max, y_min, y_max] = bounding_box(poses.iter().flatten());
    let mut chart = ChartBuilder::on(&root)
        .caption(title, font())
        .set_label_area_size(LabelAreaPosition::Left, (8).percent())
        .set_label_area_size(LabelAreaPosition::Bottom, (4).percent())
        .margin((8).percent())
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_label_style(font())
        .y_label_style(font())
        .draw()?;
    let last = poses.len().saturating_sub(1);
    for (i, pose) in poses.iter().enumerate() {
        let color = match i {
            0 => BLUE.to_rgba(),
            i if i == last => RED.to_rgba(),
            _ => BLACK.mix(0.15),
        };
        let bars = mech.platform().linkages().iter().map(|link| {
            let [j1, j2] = link.ends().map(|j| pose[j.index()]);
            PathElement::new(vec![(j1[0], j1[1]), (j2[0], j2[1])], color.stroke_width(2))
        });
        chart.draw_series(bars)?;
        let joints = mech.platform().joints().iter().zip(pose).map(|(joint, &[x, y])| {
            let style = if joint.fixed { color.filled() } else { color.stroke_width(1) };
            Circle::new((x, y), 4, style)
        });
        chart.draw_series(joints)?;
    }
    Ok(())
}

/// Get a square bounding box of the points with a margin.
pub fn bounding_box<'a, I>(pts: I) -> [f64; 4]
where
    I: IntoIterator<Item = &'a [f64; 2]>,
{
    let [mut x_min, mut x_max] = [f64::INFINITY, -f64::INFINITY];
    let [mut y_min, mut y_max] = [f64::INFINITY, -f64::INFINITY];
    for &[x, y] in pts {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if x_min > x_max {
        return [0., 1., 0., 1.];
    }
    let r = (x_max - x_min).max(y_max - y_min).max(f64::EPSILON) * 0.6;
    let [cx, cy] = [(x_min + x_max) * 0.5, (y_min + y_max) * 0.5];
    [cx - r, cx + r, cy - r, cy + r]
}
