use ndarray::array;
use riskcluster::random::{bucket_with_jitter, seeded_rng, uniform};
use riskcluster::{KMeans, KNeighborsClassifier, Matrix, MinMaxScaler, RiskGrid};
use std::collections::BTreeMap;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

const N_RISKS: usize = 100;
const K: usize = 3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    println!("=== Risk clustering ===\n");

    let mut rng = seeded_rng(Some(2024));

    // Each risk belongs to a low/medium/high profile with its own
    // (impact in $M, probability in %) ranges and a tiny multiplicative jitter
    let impact_ranges = [(1.0, 2.0), (6.0, 9.0), (11.0, 14.0)];
    let probability_ranges = [(3.0, 50.0), (34.0, 66.0), (50.0, 95.0)];
    let deviation = 0.001;

    let mut raw = Matrix::zeros((N_RISKS, 2));
    for i in 0..N_RISKS {
        let profile = uniform(&mut rng, 0.0, 3.0, true)? as usize;
        let (lo, hi) = impact_ranges[profile];
        let jitter = 1.0 + uniform(&mut rng, 0.0, deviation, false)?;
        raw[[i, 0]] = uniform(&mut rng, lo, hi, false)? * jitter;
        let (lo, hi) = probability_ranges[profile];
        let jitter = 1.0 + uniform(&mut rng, 0.0, deviation, false)?;
        raw[[i, 1]] = uniform(&mut rng, lo, hi, false)? * jitter;
    }

    // Scale against the full axis domains, not the observed range
    let scaler = MinMaxScaler::with_range(array![0.0, 0.0], array![15.0, 100.0])?;
    let x = scaler.transform(&raw)?;

    let mut kmeans = KMeans::new(K).max_iter(1000).random_state(7);
    let result = kmeans.fit(&x)?;
    let centroids = scaler.inverse_transform(&result.centroids)?;

    println!(
        "K-Means(k={}): {} iterations, converged: {}, inertia {:.4}",
        K, result.n_iter, result.converged, result.inertia
    );
    for (c, centroid) in centroids.rows().into_iter().enumerate() {
        let size = result.labels.iter().filter(|&&label| label == c).count();
        println!(
            "  Cluster {}: {:>3} risks, centroid impact {:>5.2} $M, probability {:>5.1} %",
            c + 1,
            size,
            centroid[0],
            centroid[1]
        );
    }

    println!("\n=== Risk matrix ===");
    let rows = ["Low", "Medium", "High"];
    let cols = ["Low", "Medium", "High"];
    let grid = RiskGrid::new(vec![33.0, 66.0, 100.0], vec![3.0, 10.0, 15.0])?;
    let cells = grid.cells(&raw, &result.labels, 1, 0)?;

    let mut counts: BTreeMap<(usize, usize), BTreeMap<usize, usize>> = BTreeMap::new();
    for cell in &cells {
        *counts
            .entry((cell.row, cell.col))
            .or_default()
            .entry(cell.cluster)
            .or_default() += 1;
    }

    // Highest probability first
    for row in (0..grid.n_rows()).rev() {
        for col in 0..grid.n_cols() {
            let summary = counts
                .get(&(row, col))
                .map(|by_cluster| {
                    by_cluster
                        .iter()
                        .map(|(cluster, n)| format!("C{}x{}", cluster + 1, n))
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .unwrap_or_default();
            println!(
                "  probability {:<6} | impact {:<6} | {}",
                rows[row], cols[col], summary
            );
        }
    }
    println!("  ({} of {} risks inside the grid)", cells.len(), N_RISKS);

    println!("\n=== Classifying new risks ===");
    let mut knn: KNeighborsClassifier<usize> = KNeighborsClassifier::new(K);
    knn.fit(&raw, &result.labels)?;

    let probabilities = [5.0, 15.0, 20.0, 30.0, 45.0, 50.0, 75.0, 80.0, 90.0, 95.0];
    let impacts = [0.5, 1.0, 2.0, 3.0, 4.0, 5.0, 6.6, 7.0, 8.0, 9.0, 10.0, 12.0, 15.0];
    for _ in 0..3 {
        let probability = bucket_with_jitter(&mut rng, &probabilities, 0.1)?;
        let impact = bucket_with_jitter(&mut rng, &impacts, 0.1)?;
        let cluster = knn.predict_one(array![impact, probability].view())?;
        println!(
            "  impact {:>5.2} $M, probability {:>5.1} % -> cluster {}",
            impact,
            probability,
            cluster + 1
        );
    }

    Ok(())
}
