//! molnet demo binary
//!
//! Builds a seeded synthetic experiment, lays out its correlation graph and
//! prints the final snapshot as JSON. Settings come from the file named by
//! `MOLNET_CONFIG` when set.

use std::time::Duration;

use molnet_core::{CorrelationGraph, Interner, Molecule, MolnetConfig, Sample, SampleSet};
use molnet_layout::{Bounds, LayoutGraph, LayoutRunner, LayoutWorker};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

const MOLECULES: usize = 24;
const SAMPLES: usize = 40;
const GROUPS: usize = 3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::var("MOLNET_CONFIG") {
        Ok(path) => MolnetConfig::load(path)?,
        Err(_) => MolnetConfig::default(),
    };

    let mut interner = Interner::new();
    let mut graph = synthetic_graph(&mut interner, &config, config.layout.seed.unwrap_or(1));

    let layout_graph = LayoutGraph::from_graph(
        &mut graph,
        config.correlation.method,
        config.layout.edge_threshold,
    );
    let runner = LayoutRunner::new(layout_graph, &config.layout)?;
    let worker = LayoutWorker::spawn(runner, Bounds::new(800.0, 600.0)?)?;

    // Poll settled snapshots the way a renderer would
    while !worker.is_finished() {
        std::thread::sleep(Duration::from_millis(50));
        tracing::debug!("Layout at pass {}", worker.snapshot().pass);
    }
    let snapshot = worker.snapshot();
    let report = worker.join()?;

    tracing::info!("Layout {:?} after {} passes", report.state, report.passes);

    let named: Vec<_> = snapshot
        .positions
        .iter()
        .map(|(id, p)| (interner.resolve(*id).unwrap_or("?"), p))
        .collect();
    println!("{}", serde_json::to_string_pretty(&named)?);
    Ok(())
}

/// Molecules in a few groups; members of a group share a latent profile
fn synthetic_graph(interner: &mut Interner, config: &MolnetConfig, seed: u64) -> CorrelationGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let ids: Vec<_> = (0..MOLECULES)
        .map(|i| interner.intern(&format!("M{i:02}")))
        .collect();

    let mut samples = SampleSet::new(config.correlation.missing_value);
    for s in 0..SAMPLES {
        let latent: Vec<f64> = (0..GROUPS).map(|_| rng.gen_range(1.0..10.0)).collect();
        let mut sample = Sample::new(format!("S{s:02}"));
        for (i, id) in ids.iter().enumerate() {
            // Roughly one reading in ten is missing
            if rng.gen_bool(0.1) {
                continue;
            }
            let value = latent[i % GROUPS] + rng.gen_range(-0.5..0.5);
            sample = sample.with_value(*id, value);
        }
        samples.push(sample);
    }

    let mut graph = CorrelationGraph::new(samples);
    for i in 0..MOLECULES {
        graph.add(Molecule::new(interner, &format!("M{i:02}")).with_attribute("group", (i % GROUPS).to_string()));
    }
    graph
}
