//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};

use jc_core::{AnalysisConfig, Error};
use jc_data::{
    generate_toy_jets, read_jet_parquet, selection_mask, write_jet_parquet, JetTensor, ToyConfig,
};
use jc_eec::LongestSideEec;
use jc_viz::EecSpectrumArtifact;
use jc_viz_render::RenderConfig;

/// Per-flag overrides applied on top of the (optional) config file.
#[derive(Debug, Default)]
pub struct CutOverrides {
    pub min_jet_pt: Option<f64>,
    pub max_jet_pt: Option<f64>,
    pub min_particle_pt: Option<f64>,
    pub min_jet_eta: Option<f64>,
    pub max_jet_eta: Option<f64>,
    pub bins: Option<usize>,
    pub axis_min: Option<f64>,
    pub axis_max: Option<f64>,
}

impl CutOverrides {
    fn apply(&self, config: &mut AnalysisConfig) {
        if let Some(v) = self.min_jet_pt {
            config.cuts.min_jet_pt = v;
        }
        if let Some(v) = self.max_jet_pt {
            config.cuts.max_jet_pt = v;
        }
        if let Some(v) = self.min_particle_pt {
            config.cuts.min_particle_pt = v;
        }
        if let Some(v) = self.min_jet_eta {
            config.cuts.min_jet_eta = v;
        }
        if let Some(v) = self.max_jet_eta {
            config.cuts.max_jet_eta = v;
        }
        if let Some(v) = self.bins {
            config.eec.n_bins = v;
        }
        if let Some(v) = self.axis_min {
            config.eec.axis_min = v;
        }
        if let Some(v) = self.axis_max {
            config.eec.axis_max = v;
        }
    }
}

pub fn cmd_simulate(events: usize, seed: u64, output: &Path) -> Result<()> {
    let store = generate_toy_jets(ToyConfig { n_jets: events, seed });
    write_jet_parquet(&store, output)
        .with_context(|| format!("writing toy sample to {}", output.display()))?;
    tracing::info!(jets = store.n_jets(), path = %output.display(), "toy sample written");

    let summary = serde_json::json!({
        "jets": store.n_jets(),
        "max_particles": store.max_particles(),
        "seed": seed,
        "path": output.display().to_string(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub fn cmd_eec(
    input: &Path,
    config_path: Option<&Path>,
    overrides: &CutOverrides,
    output: &Path,
    artifact_path: Option<&Path>,
    summary_path: Option<&Path>,
    threads: usize,
) -> Result<()> {
    if threads > 0 {
        let _ = rayon::ThreadPoolBuilder::new().num_threads(threads).build_global();
    }

    let mut config = match config_path {
        Some(p) => AnalysisConfig::from_path(p)
            .with_context(|| format!("loading config from {}", p.display()))?,
        None => AnalysisConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;

    tracing::info!(path = %input.display(), "loading jet table");
    let store = read_jet_parquet(input)?;
    tracing::info!(
        jets = store.n_jets(),
        max_particles = store.max_particles(),
        "jet table loaded"
    );

    let tensor = JetTensor::from_store(&store, config.cuts.min_particle_pt);
    let mask = selection_mask(store.jet_pt(), store.jet_eta(), &config.cuts)?;
    let selected = tensor.select_rows(&mask)?;
    tracing::info!(selected = selected.n_jets(), total = tensor.n_jets(), "selection applied");

    if selected.n_jets() == 0 {
        return Err(Error::EmptySelection(config.cuts.summary()).into());
    }

    let mut eec = LongestSideEec::new(config.eec)?;
    eec.compute(&selected);
    eec.normalize()?;

    let artifact = EecSpectrumArtifact::from_histogram(
        eec.histogram(),
        config.eec.order,
        config.cuts,
        tensor.n_jets(),
        selected.n_jets(),
    )?;
    let artifact_json = serde_json::to_string_pretty(&artifact)?;
    if let Some(p) = artifact_path {
        std::fs::write(p, &artifact_json)
            .with_context(|| format!("writing artifact to {}", p.display()))?;
    }

    jc_viz_render::render_to_file(&artifact_json, output, &RenderConfig::default())
        .with_context(|| format!("rendering plot to {}", output.display()))?;
    tracing::info!(path = %output.display(), "plot written");

    let summary = serde_json::json!({
        "jets_total": tensor.n_jets(),
        "jets_selected": selected.n_jets(),
        "max_particles": tensor.max_particles(),
        "order": config.eec.order,
        "bins": config.eec.n_bins,
        "histogram_sum": eec.sum(),
        "plot": output.display().to_string(),
    });
    let summary_text = serde_json::to_string_pretty(&summary)?;
    match summary_path {
        Some(p) => std::fs::write(p, summary_text)
            .with_context(|| format!("writing summary to {}", p.display()))?,
        None => println!("{summary_text}"),
    }
    Ok(())
}

pub fn cmd_viz(artifact: &Path, output: &Path) -> Result<()> {
    let artifact_json = std::fs::read_to_string(artifact)
        .with_context(|| format!("reading artifact from {}", artifact.display()))?;
    jc_viz_render::render_to_file(&artifact_json, output, &RenderConfig::default())
        .with_context(|| format!("rendering plot to {}", output.display()))?;
    tracing::info!(path = %output.display(), "plot written");
    Ok(())
}
