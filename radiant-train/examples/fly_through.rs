//! Dataset inspection and fly-through example
//!
//! Loads a Blender-style dataset, samples a training batch and sweeps an
//! interpolated camera path between two views, logging ray statistics.
//!
//! Usage:
//!   cargo run -p radiant-train --example fly_through -- <data_dir> [steps]

use radiant_train::{CameraDataset, DatasetConfig};
use std::error::Error;
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let data_dir = args
        .next()
        .map(PathBuf::from)
        .ok_or("Please provide a dataset directory")?;
    let steps: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(8);

    let dataset = CameraDataset::load(&DatasetConfig::new(&data_dir))?;
    let (width, height) = dataset.dimensions();
    info!(
        "Loaded {} images at {}x{} (focal {:.2}, bbox {:?})",
        dataset.n_images(),
        width,
        height,
        dataset.focal(),
        dataset.object_bbox()
    );

    let batch = dataset.gen_random_rays_at(0, 512)?;
    let covered = batch.iter().filter(|s| s.mask > 0.0).count();
    info!(
        "Random batch: {} rays, {} inside the mask",
        batch.len(),
        covered
    );

    let last = dataset.n_images() - 1;
    for step in 0..=steps {
        let ratio = step as f32 / steps.max(1) as f32;
        let bundle = dataset.gen_rays_between(0, last, ratio, 4)?;
        let bounds = dataset.near_far_from_sphere(bundle.origins(), bundle.directions())?;
        let mean_near = bounds.iter().map(|b| b.near).sum::<f32>() / bounds.len() as f32;
        let (rows, cols) = bundle.dimensions();
        info!(
            "ratio {:.2}: camera at {}, {}x{} rays, mean near {:.3}",
            ratio,
            bundle.origin(0, 0),
            cols,
            rows,
            mean_near
        );
    }

    let preview = dataset.image_at(0, 4)?;
    info!("Preview image: {}x{}", preview.width(), preview.height());
    Ok(())
}
