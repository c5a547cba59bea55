use ndarray::array;
use riskcluster::datasets::make_blobs;
use riskcluster::random::seeded_rng;
use riskcluster::{Convergence, KMeansConfig, Seeding, distortion_curve};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    println!("=== Elbow method ===\n");

    let centers = array![[0.0, 0.0], [8.0, 8.0], [0.0, 8.0], [8.0, 0.0]];
    let mut rng = seeded_rng(Some(5));
    let x = make_blobs(&centers, 25, 1.0, &mut rng)?;
    println!(
        "Dataset: {} samples, {} features, {} true clusters\n",
        x.nrows(),
        x.ncols(),
        centers.nrows()
    );

    for init in [Seeding::Random, Seeding::KMeansPlusPlus] {
        let template = KMeansConfig {
            max_iter: 300,
            convergence: Convergence::Tolerance(1e-6),
            init,
            ..KMeansConfig::default()
        };

        let curve = distortion_curve(&x, 8, &template, &mut rng)?;
        println!("{:?} seeding:", init);
        for (i, distortion) in curve.iter().enumerate() {
            let bar = "#".repeat((distortion / curve[0] * 50.0).round() as usize);
            println!("  k={} {:>10.3} {}", i + 1, distortion, bar);
        }
        println!();
    }

    Ok(())
}
