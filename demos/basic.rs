use gpui_chartpath::{ChartConfig, ChartState, Dataset, ScreenSize, SmoothingStrategy};

fn wave(phase: f64, count: usize) -> Dataset {
    Dataset::from_pairs((0..count).map(|i| {
        let x = i as f64;
        (x, (x * 0.4 + phase).sin() * 10.0 + 20.0)
    }))
    .with_smoothing(SmoothingStrategy::Complex, 0.2)
}

fn main() {
    let size = ScreenSize::new(320.0, 120.0);
    let config = ChartConfig::default().with_hit_slop(8.0);
    let mut chart = ChartState::builder().config(config).dataset(wave(0.0, 12)).build();

    let frame = chart.frame(size);
    println!("settled: {}", frame.path);
    if let Some(extremes) = chart.extremes() {
        println!(
            "extremes: min {:?} max {:?}",
            extremes.smallest_y, extremes.greatest_y
        );
    }

    chart.set_dataset(wave(1.5, 18));
    for step in 0..=4 {
        let progress = step as f64 / 4.0;
        chart.set_progress(progress);
        let frame = chart.frame(size);
        println!("progress {progress:.2}: {} commands", frame.path.len());
    }

    chart.set_gesture(Some(100.0));
    let frame = chart.frame(size);
    if let Some(reading) = frame.reading {
        println!(
            "readout: x={} y={:.3} marker=({:.1}, {:.1})",
            reading.nearest.original_x,
            reading.nearest.original_y,
            reading.marker.x,
            reading.marker.y
        );
    }
    for guide in &frame.guides {
        println!("guide at x={:.1} y={:.1} label={:?}", guide.x, guide.y, guide.label_x);
    }
    println!("fill: {}", frame.fill_path);
}
