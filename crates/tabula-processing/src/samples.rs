//! Built-in synthetic sample datasets for demos and tests: a small iris
//! lookalike (classification), housing prices (regression) and customer
//! segmentation (classification).

use crate::types::{Cell, Dataset, Row};
use rand::Rng;

/// Which built-in sample to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Iris,
    Housing,
    Customer,
}

/// Generate a sample dataset with the thread RNG.
pub fn generate(kind: SampleKind) -> Dataset {
    generate_with_rng(kind, &mut rand::thread_rng())
}

/// Generate a sample dataset with a caller-supplied RNG.
pub fn generate_with_rng(kind: SampleKind, rng: &mut impl Rng) -> Dataset {
    match kind {
        SampleKind::Iris => iris(rng),
        SampleKind::Housing => housing(rng),
        SampleKind::Customer => customer(rng),
    }
}

/// 150 rows, three species of 50, four numeric measurements jittered
/// around per-species base values. Target: `species`.
fn iris(rng: &mut impl Rng) -> Dataset {
    let columns = vec![
        "sepal_length".to_string(),
        "sepal_width".to_string(),
        "petal_length".to_string(),
        "petal_width".to_string(),
        "species".to_string(),
    ];
    let species = ["setosa", "versicolor", "virginica"];
    let bases = [
        [5.0, 3.4, 1.5, 0.2],
        [6.0, 2.8, 4.0, 1.3],
        [6.5, 3.0, 5.5, 2.0],
    ];
    let spreads = [1.0, 0.8, 1.0, 0.5];

    let rows = (0..150)
        .map(|i| {
            let s = i / 50;
            let mut row = Row::with_capacity(5);
            for (j, name) in columns[..4].iter().enumerate() {
                let value = bases[s][j] + (rng.gen_range(-0.5..0.5)) * spreads[j];
                row.insert(name.clone(), Cell::Number(round1(value)));
            }
            row.insert("species".to_string(), Cell::text(species[s]));
            row
        })
        .collect();

    Dataset::new(columns, rows)
}

/// 200 rows of house attributes with a price derived from them plus noise.
/// Target: `price`.
fn housing(rng: &mut impl Rng) -> Dataset {
    let columns = vec![
        "rooms".to_string(),
        "age".to_string(),
        "distance".to_string(),
        "tax".to_string(),
        "crime_rate".to_string(),
        "price".to_string(),
    ];

    let rows = (0..200)
        .map(|_| {
            let rooms = rng.gen_range(3..8) as f64;
            let age = rng.gen_range(0..50) as f64;
            let distance = round1(rng.gen_range(1.0..11.0));
            let tax = rng.gen_range(200..800) as f64;
            let crime_rate = round2(rng.gen_range(0.0..20.0));
            let price = (100_000.0 + rooms * 25_000.0 - age * 1_000.0
                + (10.0 - distance) * 5_000.0
                - tax * 50.0
                - crime_rate * 2_000.0
                + rng.gen_range(0.0..50_000.0))
                .floor();

            Row::from([
                ("rooms".to_string(), Cell::Number(rooms)),
                ("age".to_string(), Cell::Number(age)),
                ("distance".to_string(), Cell::Number(distance)),
                ("tax".to_string(), Cell::Number(tax)),
                ("crime_rate".to_string(), Cell::Number(crime_rate)),
                ("price".to_string(), Cell::Number(price)),
            ])
        })
        .collect();

    Dataset::new(columns, rows)
}

/// 200 rows of customer attributes with a segment derived from income and
/// spending score. Target: `segment`.
fn customer(rng: &mut impl Rng) -> Dataset {
    let columns = vec![
        "age".to_string(),
        "income".to_string(),
        "spending_score".to_string(),
        "work_experience".to_string(),
        "segment".to_string(),
    ];

    let rows = (0..200)
        .map(|_| {
            let age = rng.gen_range(20..80) as f64;
            let income = rng.gen_range(25_000..125_000) as f64;
            let spending_score = rng.gen_range(0..100) as f64;
            let work_experience = rng.gen_range(0..40) as f64;

            let segment = if income > 80_000.0 && spending_score > 70.0 {
                "Enterprise"
            } else if income > 50_000.0 && spending_score > 40.0 {
                "Premium"
            } else {
                "Basic"
            };

            Row::from([
                ("age".to_string(), Cell::Number(age)),
                ("income".to_string(), Cell::Number(income)),
                ("spending_score".to_string(), Cell::Number(spending_score)),
                ("work_experience".to_string(), Cell::Number(work_experience)),
                ("segment".to_string(), Cell::text(segment)),
            ])
        })
        .collect();

    Dataset::new(columns, rows)
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
