use std::{io::stdout, time::Instant};

use tracing::debug;

use crate::{
    core::{
        binner::{bin_by_range, count_points, mean_by_label, mean_points, range_step},
        bounds::extreme_segment,
        color::{AnsiCode, colorize},
        data::{DataPoint, Segment, Value, normalize, read_csv_from_path, read_values_from_path},
        error::GraphError,
        rng::DemoRng,
    },
    render::Graph,
};

use super::parse::{CsvArgs, DemoArgs, HistogramArgs};

/// Sort key: the scalar itself, or the extreme segment of a stack.
fn sort_key(p: &DataPoint) -> f64 {
    match p.value() {
        Value::Scalar(v) => *v,
        Value::Composite(segs) => extreme_segment(segs).map_or(0.0, |s| s.magnitude),
    }
}

pub fn csv(a: CsvArgs) -> Result<(), GraphError> {
    let cfg = a.style.to_config()?;

    let t_ingest = Instant::now();
    let items = read_csv_from_path(&a.file)?;
    let mut points = normalize(&items);
    debug!(
        micros = t_ingest.elapsed().as_micros(),
        read = items.len(),
        kept = points.len(),
        "csv ingest"
    );

    if a.mean {
        points = mean_by_label(&points);
    }
    if points.is_empty() {
        return Err(GraphError::EmptyData);
    }
    if a.sort {
        points.sort_by(|l, r| sort_key(r).total_cmp(&sort_key(l)));
    }

    Graph::new(cfg).write_to(&mut stdout().lock(), a.title.as_deref(), &points)
}

pub fn histogram(a: HistogramArgs) -> Result<(), GraphError> {
    let cfg = a.style.to_config()?;
    let values = read_values_from_path(&a.file)?;

    let step = range_step(&values, a.steps, a.max_step);
    let bins = bin_by_range(&values, step);
    debug!(values = values.len(), step, bins = bins.len(), "binned");

    let points = if a.mean {
        mean_points(&bins)
    } else {
        count_points(&bins)
    };
    Graph::new(cfg).write_to(&mut stdout().lock(), Some(a.title.as_str()), &points)
}

pub fn demo(a: &DemoArgs) -> Result<(), GraphError> {
    let cfg = a.style.to_config()?;
    let mut rng = a.seed.map_or_else(DemoRng::from_clock, DemoRng::seeded);
    let palette = [AnsiCode::red(), AnsiCode::green(), AnsiCode::blue()];

    let points: Vec<DataPoint> = (0..a.rows)
        .map(|i| {
            let label = format!("row {}", i + 1);
            if a.stacked {
                let sign = if rng.one_in(4) { -1.0 } else { 1.0 };
                let mut level = 0.0;
                let segs = palette
                    .iter()
                    .map(|c| {
                        level += rng.gauss(0.0, 20.0).abs() + 1.0;
                        Segment::colored(sign * level, *c)
                    })
                    .collect();
                DataPoint::composite(label, segs)
            } else {
                let c = palette[rng.index(palette.len())];
                DataPoint::scalar(label, rng.gauss(0.0, 100.0)).with_color(c)
            }
        })
        .collect();

    Graph::new(cfg).write_to(&mut stdout().lock(), Some("Random demo"), &points)
}

/// Pretty-print available color names + an example hex code.
pub fn colors() {
    println!("\nPossible colors:");
    println!("{}", colorize(&AnsiCode::black(), "black"));
    println!("{}", colorize(&AnsiCode::red(), "red"));
    println!("{}", colorize(&AnsiCode::green(), "green"));
    println!("{}", colorize(&AnsiCode::yellow(), "yellow"));
    println!("{}", colorize(&AnsiCode::blue(), "blue"));
    println!("{}", colorize(&AnsiCode::magenta(), "magenta"));
    println!("{}", colorize(&AnsiCode::cyan(), "cyan"));
    println!("{}", colorize(&AnsiCode::white(), "white"));
    println!("{}", colorize(&AnsiCode::orange(), "orange"));
    println!(
        "{}  (palette index 0-255)",
        colorize(&AnsiCode::indexed(208), "208")
    );
    println!(
        "{}  (#505050 or any other #RRGGBB)\n",
        colorize(&AnsiCode::rgb(0x50, 0x50, 0x50), "#505050")
    );
}

/// Print handy invocations for new users.
pub fn examples() {
    let bin = "ascii-graph";
    println!(
        "
Example invocations
-------------------
• Basic CSV          : {bin} csv prices.csv
• With a title       : {bin} csv prices.csv --title \"price by room\"
• Largest first      : {bin} csv prices.csv --sort
• Mean per label     : {bin} csv rents.csv --mean --sort
• Human-readable     : {bin} csv sizes.csv --units cs
• Two decimals, 1,000: {bin} csv prices.csv -p 2 --grouping
• Stacked rows       : printf 'q1,10@red;25@green;40@blue\\n' | {bin} csv -
• Histogram          : {bin} histogram surfaces.txt --steps 7 --max-step 5
• Random stacked demo: {bin} demo --stacked --seed 42
"
    );
}
